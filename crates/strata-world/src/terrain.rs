//! Column rules: noise → surface height → per-cell layer.

use crate::chunk_coord::ChunkCoord;
use crate::noise::{NoiseField, TerrainNoise};
use crate::worldgen::WorldGenParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainLayer {
    Surface,
    Subsurface,
    Liquid,
    Rock,
}

/// Maps a `[-1, 1]` sample to a column height in `[0, chunk_height - 1]`.
pub fn remap_noise_to_height(noise: f32, chunk_height: usize) -> i32 {
    let half = (chunk_height / 2) as f32;
    let h = (noise * half + half).round() as i32;
    h.clamp(0, chunk_height as i32 - 1)
}

/// Seeded terrain source shared by every chunk of a world.
pub struct TerrainGen<N = TerrainNoise> {
    pub seed: i32,
    pub params: WorldGenParams,
    noise: N,
}

impl TerrainGen<TerrainNoise> {
    pub fn new(seed: i32, params: WorldGenParams) -> Self {
        Self {
            seed,
            noise: TerrainNoise::new(seed),
            params,
        }
    }
}

impl<N: NoiseField> TerrainGen<N> {
    pub fn with_noise(seed: i32, params: WorldGenParams, noise: N) -> Self {
        Self {
            seed,
            params,
            noise,
        }
    }

    #[inline]
    pub fn chunk_width(&self) -> usize {
        self.params.chunk_width
    }

    #[inline]
    pub fn chunk_height(&self) -> usize {
        self.params.chunk_height
    }

    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> (i32, i32) {
        coord.origin(self.params.chunk_width)
    }

    /// Surface height of the column at world `(wx, wz)`.
    pub fn height_for(&self, wx: i32, wz: i32) -> i32 {
        let s = self.params.horizontal_scale;
        let noise = self.noise.sample(wx as f32 / s, wz as f32 / s);
        remap_noise_to_height(noise, self.params.chunk_height)
    }

    /// First matching rule wins: surface, subsurface, liquid, then rock.
    /// Cells under the water level that are neither surface nor subsurface are
    /// liquid even when they lie below the column's surface.
    pub fn layer_at(&self, y: i32, height: i32) -> TerrainLayer {
        if y == height {
            TerrainLayer::Surface
        } else if y > height - self.params.subsurface_depth && y < height {
            TerrainLayer::Subsurface
        } else if y < self.params.water_level {
            TerrainLayer::Liquid
        } else {
            TerrainLayer::Rock
        }
    }

    /// Material key configured for a layer.
    pub fn layer_key(&self, layer: TerrainLayer) -> &str {
        let names = &self.params.layers;
        match layer {
            TerrainLayer::Surface => &names.surface,
            TerrainLayer::Subsurface => &names.subsurface,
            TerrainLayer::Liquid => &names.liquid,
            TerrainLayer::Rock => &names.rock,
        }
    }
}
