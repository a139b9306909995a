use std::time::Instant;

use strata_blocks::{Block, MaterialCatalog, MaterialId};
use strata_world::{ChunkCoord, NoiseField, TerrainGen, TerrainLayer};

use crate::buf::ChunkBuf;
use crate::error::{GenError, ResourceError};

/// Maps a layer's material key to an id, acquiring whatever backs the material
/// (a GPU texture, usually) the first time it is asked. The generator calls
/// `acquire` at most once per layer per chunk.
pub trait MaterialResolver {
    fn acquire(&mut self, key: &str) -> Result<MaterialId, ResourceError>;
}

/// Catalog lookup only, for generation without any resources.
impl MaterialResolver for MaterialCatalog {
    fn acquire(&mut self, key: &str) -> Result<MaterialId, ResourceError> {
        self.get_id(key).ok_or_else(|| ResourceError::UnknownMaterial {
            key: key.to_string(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub buf: ChunkBuf,
    /// Surface height per column, indexed `x * W + z`.
    pub heights: Vec<i32>,
}

impl ChunkGenerateResult {
    pub fn column_count(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn column_height(&self, x: usize, z: usize) -> i32 {
        self.heights[x * self.buf.sz + z]
    }
}

/// Fills a `W × H × W` chunk from the terrain's height field. Every slot gets
/// a layer material, so the result is fully solid.
pub fn generate_chunk_buffer<N: NoiseField>(
    terrain: &TerrainGen<N>,
    coord: ChunkCoord,
    resolver: &mut impl MaterialResolver,
) -> Result<ChunkGenerateResult, GenError> {
    let started = Instant::now();
    let w = terrain.chunk_width();
    let sy = terrain.chunk_height();
    let (base_x, base_z) = terrain.chunk_origin(coord);

    let mut buf = ChunkBuf::filled(coord, w, sy, w, Block::AIR);
    let mut heights = vec![0i32; w * w];
    // One slot per layer, see layer_slot
    let mut palette: [Option<MaterialId>; 4] = [None; 4];

    for x in 0..w {
        for z in 0..w {
            let height = terrain.height_for(base_x + x as i32, base_z + z as i32);
            heights[x * w + z] = height;
            for y in 0..sy {
                let layer = terrain.layer_at(y as i32, height);
                let slot = layer_slot(layer);
                let id = match palette[slot] {
                    Some(id) => id,
                    None => {
                        let key = terrain.layer_key(layer);
                        let id = resolver
                            .acquire(key)
                            .map_err(|source| GenError { coord, source })?;
                        palette[slot] = Some(id);
                        id
                    }
                };
                buf.set_local(x, y, z, Block::solid(id));
            }
        }
    }

    log::debug!(
        "generated chunk {} ({}x{}x{}) in {:?}",
        coord,
        w,
        sy,
        w,
        started.elapsed()
    );
    Ok(ChunkGenerateResult { buf, heights })
}

#[inline]
fn layer_slot(layer: TerrainLayer) -> usize {
    match layer {
        TerrainLayer::Surface => 0,
        TerrainLayer::Subsurface => 1,
        TerrainLayer::Liquid => 2,
        TerrainLayer::Rock => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::WorldGenParams;

    fn catalog() -> MaterialCatalog {
        MaterialCatalog::from_toml_str(
            r#"
            [materials]
            dirt = ["blocks/dirt.png"]
            grass = ["blocks/grass.png"]
            stone = ["blocks/stone.png"]
            water = ["blocks/water.png"]
            "#,
        )
        .unwrap()
    }

    struct Counting {
        inner: MaterialCatalog,
        calls: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl MaterialResolver for Counting {
        fn acquire(&mut self, key: &str) -> Result<MaterialId, ResourceError> {
            self.calls.push(key.to_string());
            if self.fail_on == Some(key) {
                return Err(ResourceError::NoTexture {
                    material: key.to_string(),
                });
            }
            self.inner.acquire(key)
        }
    }

    #[test]
    fn seeded_generation_is_bit_identical() {
        let t = TerrainGen::new(1000, WorldGenParams::default());
        let mut cat = catalog();
        let a = generate_chunk_buffer(&t, ChunkCoord::new(0, 0), &mut cat).unwrap();
        let b = generate_chunk_buffer(&t, ChunkCoord::new(0, 0), &mut cat).unwrap();
        assert_eq!(a.buf, b.buf);
        assert_eq!(a.heights, b.heights);
        assert_eq!(a.column_count(), 16 * 16);
        assert_eq!(a.buf.solid_count(), 16 * 32 * 16);
    }

    #[test]
    fn every_slot_is_filled_with_the_layer_material() {
        let t = TerrainGen::with_noise(0, WorldGenParams::default(), |_x: f32, _z: f32| -0.375);
        let mut cat = catalog();
        let r = generate_chunk_buffer(&t, ChunkCoord::new(2, -1), &mut cat).unwrap();
        // -0.375 * 16 + 16 = 10
        assert_eq!(r.column_height(3, 4), 10);
        assert_eq!(r.buf.solid_count(), 16 * 32 * 16);
        let id = |k: &str| Block::solid(cat.get_id(k).unwrap());
        assert_eq!(r.buf.get_local(3, 10, 4), id("grass"));
        assert_eq!(r.buf.get_local(3, 8, 4), id("dirt"));
        assert_eq!(r.buf.get_local(3, 5, 4), id("water"));
        assert_eq!(r.buf.get_local(3, 25, 4), id("stone"));
    }

    #[test]
    fn resolver_is_asked_once_per_layer() {
        let t = TerrainGen::new(1000, WorldGenParams::default());
        let mut r = Counting {
            inner: catalog(),
            calls: Vec::new(),
            fail_on: None,
        };
        generate_chunk_buffer(&t, ChunkCoord::new(0, 0), &mut r).unwrap();
        let mut calls = r.calls.clone();
        calls.sort();
        calls.dedup();
        assert_eq!(calls.len(), r.calls.len());
        assert!(r.calls.len() <= 4);
    }

    #[test]
    fn resolver_failure_aborts_with_coord() {
        let t = TerrainGen::with_noise(0, WorldGenParams::default(), |_x: f32, _z: f32| 0.0);
        let mut r = Counting {
            inner: catalog(),
            calls: Vec::new(),
            fail_on: Some("water"),
        };
        let err = generate_chunk_buffer(&t, ChunkCoord::new(3, 4), &mut r).unwrap_err();
        assert_eq!(err.coord, ChunkCoord::new(3, 4));
        assert_eq!(err.source.material(), Some("water"));
    }

    #[test]
    fn unknown_layer_key_is_reported() {
        let mut params = WorldGenParams::default();
        params.layers.rock = "basalt".into();
        let t = TerrainGen::with_noise(0, params, |_x: f32, _z: f32| -1.0);
        let err = generate_chunk_buffer(&t, ChunkCoord::new(0, 0), &mut catalog()).unwrap_err();
        assert!(matches!(
            err.source,
            ResourceError::UnknownMaterial { ref key } if key == "basalt"
        ));
    }
}
