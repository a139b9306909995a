/// Position of a chunk in the world grid; `(cx, cz)` covers world x in
/// `[cx*W, (cx+1)*W)` and z in `[cz*W, (cz+1)*W)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// World-space origin of the chunk's `(0, 0)` column.
    #[inline]
    pub fn origin(self, chunk_width: usize) -> (i32, i32) {
        let w = chunk_width as i32;
        (self.cx * w, self.cz * w)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.cx, self.cz)
    }
}
