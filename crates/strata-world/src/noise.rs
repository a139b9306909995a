use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D scalar field in `[-1, 1]`.
pub trait NoiseField {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<F> NoiseField for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Perlin height noise seeded once; callers pre-scale coordinates.
pub struct TerrainNoise {
    noise: FastNoiseLite,
}

impl TerrainNoise {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }
}

impl NoiseField for TerrainNoise {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }
}
