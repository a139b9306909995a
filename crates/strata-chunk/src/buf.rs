use strata_blocks::Block;
use strata_world::ChunkCoord;

/// Dense `sx × sy × sz` voxel grid. Storage is x-major so walking the linear
/// buffer visits `x`, then `y`, then `z`, the same order as rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl ChunkBuf {
    /// Chunk with every slot set to `block`.
    pub fn filled(coord: ChunkCoord, sx: usize, sy: usize, sz: usize, block: Block) -> Self {
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: vec![block; sx * sy * sz],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.sy + y) * self.sz + z
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = self.idx(x, y, z);
        self.blocks[i] = block;
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz
    }

    /// Signed local lookup; `None` outside the chunk.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if self.in_bounds(x, y, z) {
            Some(self.get_local(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn base_x(&self) -> i32 {
        self.coord.cx * self.sx as i32
    }

    #[inline]
    pub fn base_z(&self) -> i32 {
        self.coord.cz * self.sz as i32
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let base_x = self.base_x();
        let base_z = self.base_z();
        if wy < 0 || wy >= self.sy as i32 {
            return false;
        }
        wx >= base_x && wx < base_x + self.sx as i32 && wz >= base_z && wz < base_z + self.sz as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let lx = (wx - self.base_x()) as usize;
        let lz = (wz - self.base_z()) as usize;
        Some(self.get_local(lx, wy as usize, lz))
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }
}
