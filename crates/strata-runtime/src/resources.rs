use std::collections::BTreeMap;
use std::fs;

use strata_blocks::MaterialId;
use strata_chunk::{MaterialResolver, ResourceError};
use strata_render::{GeometryHandle, GraphicsBackend, TextureHandle};
use strata_world::ChunkCoord;

use crate::assets::AssetSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryPart {
    pub material: MaterialId,
    pub geometry: GeometryHandle,
    pub vertices: usize,
}

/// Uploaded batches for one chunk, ascending by material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkGeometry {
    pub coord: ChunkCoord,
    pub parts: Vec<GeometryPart>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseCounts {
    pub geometry: usize,
    pub textures: usize,
}

/// Every backend handle a world created. Released exactly once through
/// [`GpuResources::release`], which leaves the set empty.
#[derive(Debug, Default)]
pub struct GpuResources {
    textures: BTreeMap<MaterialId, TextureHandle>,
    cube: Option<GeometryHandle>,
    chunks: Vec<ChunkGeometry>,
}

impl GpuResources {
    #[inline]
    pub fn texture(&self, mid: MaterialId) -> Option<TextureHandle> {
        self.textures.get(&mid).copied()
    }

    pub fn textures(&self) -> impl Iterator<Item = (MaterialId, TextureHandle)> + '_ {
        self.textures.iter().map(|(m, t)| (*m, *t))
    }

    #[inline]
    pub fn cube(&self) -> Option<GeometryHandle> {
        self.cube
    }

    /// Batched geometry in chunk row-major order.
    #[inline]
    pub fn chunk_geometry(&self) -> &[ChunkGeometry] {
        &self.chunks
    }

    pub fn live_handles(&self) -> usize {
        self.textures.len()
            + usize::from(self.cube.is_some())
            + self.chunks.iter().map(|c| c.parts.len()).sum::<usize>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_handles() == 0
    }

    pub fn release<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) -> ReleaseCounts {
        let mut counts = ReleaseCounts::default();
        for chunk in self.chunks.drain(..) {
            for part in chunk.parts {
                backend.release_geometry(part.geometry);
                counts.geometry += 1;
            }
        }
        if let Some(cube) = self.cube.take() {
            backend.release_geometry(cube);
            counts.geometry += 1;
        }
        for (_, tex) in std::mem::take(&mut self.textures) {
            backend.release_texture(tex);
            counts.textures += 1;
        }
        counts
    }
}

/// Collects handles while a world is being built. Dropping the guard before
/// [`ResourceGuard::into_resources`] releases everything it collected, so an
/// early `?` return never leaks.
pub struct ResourceGuard<'a, B: GraphicsBackend + ?Sized> {
    backend: &'a mut B,
    assets: &'a AssetSource,
    resources: GpuResources,
}

impl<'a, B: GraphicsBackend + ?Sized> ResourceGuard<'a, B> {
    pub fn new(backend: &'a mut B, assets: &'a AssetSource) -> Self {
        Self {
            backend,
            assets,
            resources: GpuResources::default(),
        }
    }

    #[inline]
    pub fn resources(&self) -> &GpuResources {
        &self.resources
    }

    pub fn upload_cube(&mut self, vertices: &[f32]) -> Result<GeometryHandle, ResourceError> {
        if let Some(h) = self.resources.cube {
            return Ok(h);
        }
        let h = self
            .backend
            .create_geometry(vertices)
            .map_err(|source| ResourceError::GeometryUpload {
                what: "voxel cube".to_string(),
                source,
            })?;
        self.resources.cube = Some(h);
        Ok(h)
    }

    /// Uploads `(material, vertices)` batches for one chunk. Empty batches are
    /// skipped. Parts uploaded before a failure stay tracked by the guard.
    pub fn upload_chunk<'v>(
        &mut self,
        coord: ChunkCoord,
        batches: impl IntoIterator<Item = (MaterialId, &'v [f32])>,
    ) -> Result<(), ResourceError> {
        self.resources.chunks.push(ChunkGeometry {
            coord,
            parts: Vec::new(),
        });
        let slot = self.resources.chunks.len() - 1;
        for (material, verts) in batches {
            if verts.is_empty() {
                continue;
            }
            let geometry = self.backend.create_geometry(verts).map_err(|source| {
                ResourceError::GeometryUpload {
                    what: format!("chunk {coord} material {}", material.0),
                    source,
                }
            })?;
            self.resources.chunks[slot].parts.push(GeometryPart {
                material,
                geometry,
                vertices: verts.len() / strata_render::VERTEX_STRIDE,
            });
        }
        Ok(())
    }

    /// Disarms the guard and hands the collected handles over.
    pub fn into_resources(mut self) -> GpuResources {
        std::mem::take(&mut self.resources)
    }
}

impl<'a, B: GraphicsBackend + ?Sized> MaterialResolver for ResourceGuard<'a, B> {
    fn acquire(&mut self, key: &str) -> Result<MaterialId, ResourceError> {
        let assets: &'a AssetSource = self.assets;
        let catalog = assets.catalog();
        let unknown = || ResourceError::UnknownMaterial {
            key: key.to_string(),
        };
        let mid = catalog.get_id(key).ok_or_else(unknown)?;
        if self.resources.texture(mid).is_some() {
            return Ok(mid);
        }
        let material = catalog.get(mid).ok_or_else(unknown)?;
        let path =
            material
                .texture_path(assets.root())
                .ok_or_else(|| ResourceError::NoTexture {
                    material: key.to_string(),
                })?;
        let bytes = fs::read(&path).map_err(|source| ResourceError::MissingAsset {
            material: key.to_string(),
            path: path.clone(),
            source,
        })?;
        let tex = self
            .backend
            .create_texture(&bytes)
            .map_err(|source| ResourceError::TextureUpload {
                material: key.to_string(),
                source,
            })?;
        log::info!("texture for `{}` loaded from {}", key, path.display());
        self.resources.textures.insert(mid, tex);
        Ok(mid)
    }
}

impl<B: GraphicsBackend + ?Sized> Drop for ResourceGuard<'_, B> {
    fn drop(&mut self) {
        if self.resources.is_empty() {
            return;
        }
        let counts = self.resources.release(&mut *self.backend);
        log::warn!(
            "world build aborted; released {} geometry and {} texture handles",
            counts.geometry,
            counts.textures
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::MaterialCatalog;
    use strata_render::RecordingBackend;

    fn assets() -> AssetSource {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
        AssetSource::load(root).unwrap()
    }

    #[test]
    fn dropped_guard_releases_everything() {
        let assets = assets();
        let mut backend = RecordingBackend::new();
        {
            let mut guard = ResourceGuard::new(&mut backend, &assets);
            guard.acquire("grass").unwrap();
            guard.acquire("stone").unwrap();
            guard.upload_cube(&[0.0; 15]).unwrap();
        }
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.live_geometry(), 0);
        assert_eq!(backend.textures_released, 2);
        assert_eq!(backend.invalid_releases, 0);
    }

    #[test]
    fn into_resources_keeps_handles_alive() {
        let assets = assets();
        let mut backend = RecordingBackend::new();
        let mut res = {
            let mut guard = ResourceGuard::new(&mut backend, &assets);
            let a = guard.acquire("dirt").unwrap();
            let b = guard.acquire("dirt").unwrap();
            assert_eq!(a, b);
            guard.into_resources()
        };
        assert_eq!(backend.live_textures(), 1);
        assert_eq!(res.release(&mut backend).textures, 1);
        assert_eq!(res.release(&mut backend), ReleaseCounts::default());
        assert_eq!(backend.invalid_releases, 0);
    }

    #[test]
    fn missing_texture_file_is_reported() {
        let mut cat = MaterialCatalog::new();
        cat.insert("lava", vec!["blocks/lava.png".into()]).unwrap();
        let assets = AssetSource::new(env!("CARGO_MANIFEST_DIR"), cat);
        let mut backend = RecordingBackend::new();
        let mut guard = ResourceGuard::new(&mut backend, &assets);
        let err = guard.acquire("lava").unwrap_err();
        assert!(matches!(err, ResourceError::MissingAsset { .. }));
        assert!(matches!(
            guard.acquire("nope"),
            Err(ResourceError::UnknownMaterial { .. })
        ));
    }
}
