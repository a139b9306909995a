//! Whole-voxel culling: a solid voxel is drawn when any of its six axis
//! neighbours is empty or lies outside the chunk.

use strata_blocks::Block;

use crate::buf::ChunkBuf;
use crate::face::Face;

/// Horizontally adjacent chunks consulted when cross-chunk culling is on.
/// A missing neighbour leaves that side exposed.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    pub neg_x: Option<&'a ChunkBuf>,
    pub pos_x: Option<&'a ChunkBuf>,
    pub neg_z: Option<&'a ChunkBuf>,
    pub pos_z: Option<&'a ChunkBuf>,
}

impl<'a> ChunkNeighbors<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    /// Occupancy of the cell one step outside `buf` at local `(x, y, z)`.
    /// `None` means nothing is known there, which counts as empty.
    fn probe(&self, buf: &ChunkBuf, x: i32, y: i32, z: i32) -> Option<Block> {
        if y < 0 || y >= buf.sy as i32 {
            return None;
        }
        let sx = buf.sx as i32;
        let sz = buf.sz as i32;
        let (chunk, lx, lz) = if x < 0 {
            (self.neg_x?, x + sx, z)
        } else if x >= sx {
            (self.pos_x?, x - sx, z)
        } else if z < 0 {
            (self.neg_z?, x, z + sz)
        } else if z >= sz {
            (self.pos_z?, x, z - sz)
        } else {
            return None;
        };
        chunk.get(lx, y, lz)
    }
}

/// One entry of [`ChunkBuf::visible_voxels`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleVoxel {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub block: Block,
}

impl ChunkBuf {
    /// True when stepping out of `face` from local `(x, y, z)` reaches an empty
    /// cell. Cells past the chunk's bounds are empty unless `neighbors` has them.
    pub fn face_exposed(
        &self,
        x: usize,
        y: usize,
        z: usize,
        face: Face,
        neighbors: &ChunkNeighbors<'_>,
    ) -> bool {
        let (dx, dy, dz) = face.delta();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        let nz = z as i32 + dz;
        let there = match self.get(nx, ny, nz) {
            Some(b) => Some(b),
            None => neighbors.probe(self, nx, ny, nz),
        };
        there.is_none_or(|b| b.is_air())
    }

    /// Visibility of an occupied voxel with every chunk boundary exposed.
    /// Empty cells are never visible.
    #[inline]
    pub fn is_visible(&self, x: usize, y: usize, z: usize) -> bool {
        self.is_visible_with(x, y, z, &ChunkNeighbors::none())
    }

    pub fn is_visible_with(
        &self,
        x: usize,
        y: usize,
        z: usize,
        neighbors: &ChunkNeighbors<'_>,
    ) -> bool {
        if self.get_local(x, y, z).is_air() {
            return false;
        }
        Face::ALL
            .iter()
            .any(|&f| self.face_exposed(x, y, z, f, neighbors))
    }

    /// Visible voxels in render order: `x` outer, then `y`, then `z`.
    pub fn visible_voxels(&self) -> impl Iterator<Item = VisibleVoxel> + '_ {
        self.visible_voxels_with(ChunkNeighbors::none())
    }

    pub fn visible_voxels_with<'a>(
        &'a self,
        neighbors: ChunkNeighbors<'a>,
    ) -> impl Iterator<Item = VisibleVoxel> + 'a {
        let (sx, sy, sz) = (self.sx, self.sy, self.sz);
        (0..sx)
            .flat_map(move |x| (0..sy).flat_map(move |y| (0..sz).map(move |z| (x, y, z))))
            .filter(move |&(x, y, z)| self.is_visible_with(x, y, z, &neighbors))
            .map(move |(x, y, z)| VisibleVoxel {
                x,
                y,
                z,
                block: self.get_local(x, y, z),
            })
    }
}
