/// Index into a [`MaterialCatalog`](crate::MaterialCatalog).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u16);

/// One voxel slot. Air is a sentinel, not a material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Block {
    #[default]
    Air,
    Solid(MaterialId),
}

impl Block {
    pub const AIR: Block = Block::Air;

    #[inline]
    pub const fn solid(mid: MaterialId) -> Self {
        Block::Solid(mid)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Block::Air)
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    #[inline]
    pub fn material(self) -> Option<MaterialId> {
        match self {
            Block::Air => None,
            Block::Solid(mid) => Some(mid),
        }
    }
}
