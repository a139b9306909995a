use std::time::Instant;

use strata_chunk::{ChunkBuf, ChunkNeighbors, generate_chunk_buffer};
use strata_geom::{Aabb, Mat4, Vec3};
use strata_mesh_cpu::{CUBE_HALF_EXTENT, build_chunk_mesh, cube_vertices, voxel_center};
use strata_render::GraphicsBackend;
use strata_world::{
    ChunkCoord, NoiseField, RenderMode, TerrainGen, TerrainNoise, WorldGenConfig,
};

use crate::assets::AssetSource;
use crate::error::WorldError;
use crate::resources::{GpuResources, ReleaseCounts, ResourceGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldOptions {
    pub chunks_x: usize,
    pub chunks_z: usize,
    pub mode: RenderMode,
    pub cross_chunk_culling: bool,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            chunks_x: 1,
            chunks_z: 1,
            mode: RenderMode::default(),
            cross_chunk_culling: false,
        }
    }
}

impl WorldOptions {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            chunks_x: cfg.world.chunks_x,
            chunks_z: cfg.world.chunks_z,
            mode: cfg.render.mode,
            cross_chunk_culling: cfg.render.cross_chunk_culling,
        }
    }
}

/// Per-frame traversal counters returned by [`World::render_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub chunks: usize,
    pub visible_voxels: usize,
    pub draw_calls: usize,
}

/// Fixed `chunks_x × chunks_z` grid of generated chunks sharing one terrain.
/// Chunk `(i, j)` covers world x `[i·W, (i+1)·W)` and z `[j·W, (j+1)·W)`.
pub struct World<N = TerrainNoise> {
    terrain: TerrainGen<N>,
    opts: WorldOptions,
    /// Row-major: index `i * chunks_z + j`.
    chunks: Vec<ChunkBuf>,
    visible_counts: Vec<usize>,
    resources: GpuResources,
}

impl<N: NoiseField> World<N> {
    /// Generates every chunk, then uploads whatever the render mode draws
    /// with. The first failure aborts the build and releases every handle
    /// created so far.
    pub fn generate<B: GraphicsBackend + ?Sized>(
        terrain: TerrainGen<N>,
        opts: WorldOptions,
        assets: &AssetSource,
        backend: &mut B,
    ) -> Result<Self, WorldError> {
        let started = Instant::now();
        log::info!(
            "generating {}x{} chunks (seed {}, {:?} rendering)",
            opts.chunks_x,
            opts.chunks_z,
            terrain.seed,
            opts.mode
        );
        let mut guard = ResourceGuard::new(backend, assets);

        let mut chunks = Vec::with_capacity(opts.chunks_x * opts.chunks_z);
        for i in 0..opts.chunks_x {
            for j in 0..opts.chunks_z {
                let coord = ChunkCoord::new(i as i32, j as i32);
                let generated = generate_chunk_buffer(&terrain, coord, &mut guard)?;
                chunks.push(generated.buf);
            }
        }

        let mut world = World {
            terrain,
            opts,
            chunks,
            visible_counts: Vec::new(),
            resources: GpuResources::default(),
        };
        world.visible_counts = (0..world.chunks.len())
            .map(|idx| {
                let buf = &world.chunks[idx];
                buf.visible_voxels_with(world.neighbors_of(idx)).count()
            })
            .collect();

        match world.opts.mode {
            RenderMode::PerVoxel => {
                guard
                    .upload_cube(&cube_vertices())
                    .map_err(WorldError::Geometry)?;
            }
            RenderMode::Batched => {
                for idx in 0..world.chunks.len() {
                    let buf = &world.chunks[idx];
                    let mesh = build_chunk_mesh(buf, &world.neighbors_of(idx));
                    guard
                        .upload_chunk(
                            mesh.coord,
                            mesh.parts.iter().map(|(mid, mb)| (*mid, mb.verts.as_slice())),
                        )
                        .map_err(WorldError::Geometry)?;
                }
            }
        }

        world.resources = guard.into_resources();
        log::info!(
            "world ready: {} chunks, {} visible voxels, {} GPU handles in {:?}",
            world.chunks.len(),
            world.visible_counts.iter().sum::<usize>(),
            world.resources.live_handles(),
            started.elapsed()
        );
        Ok(world)
    }

    /// Submits this frame's draws in chunk row-major order. Per-voxel mode
    /// walks visible voxels `x`, then `y`, then `z`; batched mode submits one
    /// draw per material in ascending id order.
    pub fn render_all<B: GraphicsBackend + ?Sized>(&self, backend: &mut B) -> RenderStats {
        let mut stats = RenderStats::default();
        match self.opts.mode {
            RenderMode::PerVoxel => {
                let Some(cube) = self.resources.cube() else {
                    return stats;
                };
                for (idx, buf) in self.chunks.iter().enumerate() {
                    stats.chunks += 1;
                    let (base_x, base_z) = (buf.base_x(), buf.base_z());
                    for v in buf.visible_voxels_with(self.neighbors_of(idx)) {
                        stats.visible_voxels += 1;
                        let Some(tex) = v.block.material().and_then(|m| self.resources.texture(m))
                        else {
                            continue;
                        };
                        let center =
                            voxel_center(base_x + v.x as i32, v.y as i32, base_z + v.z as i32);
                        backend.submit_draw(cube, Mat4::from_translation(center), tex);
                        stats.draw_calls += 1;
                    }
                }
            }
            RenderMode::Batched => {
                for (idx, chunk) in self.resources.chunk_geometry().iter().enumerate() {
                    stats.chunks += 1;
                    stats.visible_voxels += self.visible_counts.get(idx).copied().unwrap_or(0);
                    for part in &chunk.parts {
                        let Some(tex) = self.resources.texture(part.material) else {
                            continue;
                        };
                        backend.submit_draw(part.geometry, Mat4::IDENTITY, tex);
                        stats.draw_calls += 1;
                    }
                }
            }
        }
        log::trace!(
            target: "render",
            "frame: {} chunks, {} visible voxels, {} draws",
            stats.chunks,
            stats.visible_voxels,
            stats.draw_calls
        );
        stats
    }

    /// Returns every handle to the backend. Later calls are no-ops.
    pub fn release<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) -> ReleaseCounts {
        let counts = self.resources.release(backend);
        if counts != ReleaseCounts::default() {
            log::info!(
                "released {} geometry and {} texture handles",
                counts.geometry,
                counts.textures
            );
        }
        counts
    }

    fn neighbors_of(&self, idx: usize) -> ChunkNeighbors<'_> {
        if !self.opts.cross_chunk_culling {
            return ChunkNeighbors::none();
        }
        let nz = self.opts.chunks_z;
        let (i, j) = (idx / nz, idx % nz);
        ChunkNeighbors {
            neg_x: i.checked_sub(1).and_then(|i| self.chunk(i, j)),
            pos_x: self.chunk(i + 1, j),
            neg_z: j.checked_sub(1).and_then(|j| self.chunk(i, j)),
            pos_z: self.chunk(i, j + 1),
        }
    }
}

impl<N> World<N> {
    /// Chunk at grid slot `(i, j)`.
    pub fn chunk(&self, i: usize, j: usize) -> Option<&ChunkBuf> {
        if i >= self.opts.chunks_x || j >= self.opts.chunks_z {
            return None;
        }
        self.chunks.get(i * self.opts.chunks_z + j)
    }

    pub fn chunks(&self) -> &[ChunkBuf] {
        &self.chunks
    }

    #[inline]
    pub fn resources(&self) -> &GpuResources {
        &self.resources
    }

    /// Visible voxel count per chunk, row-major.
    pub fn visible_counts(&self) -> &[usize] {
        &self.visible_counts
    }

    /// Render-space box enclosing every voxel cube.
    pub fn render_bounds(&self) -> Aabb {
        let w = self.terrain.params.chunk_width as i32;
        let h = self.terrain.params.chunk_height as i32;
        let hi = voxel_center(
            w * self.opts.chunks_x as i32 - 1,
            h - 1,
            w * self.opts.chunks_z as i32 - 1,
        );
        Aabb::new(Vec3::ZERO, hi).expanded(CUBE_HALF_EXTENT)
    }
}

impl<N> Drop for World<N> {
    fn drop(&mut self) {
        if !self.resources.is_empty() {
            log::warn!(
                "world dropped with {} live GPU handles; call World::release first",
                self.resources.live_handles()
            );
        }
    }
}
