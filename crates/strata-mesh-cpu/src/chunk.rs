use std::collections::BTreeMap;

use strata_blocks::MaterialId;
use strata_chunk::{ChunkBuf, ChunkNeighbors, Face};
use strata_geom::Aabb;
use strata_world::ChunkCoord;

use crate::constants::{CUBE_HALF_EXTENT, voxel_center};
use crate::mesh_build::MeshBuild;

/// Face batches for one chunk. `parts` iterates in ascending material id.
#[derive(Clone, Debug)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub parts: BTreeMap<MaterialId, MeshBuild>,
}

impl ChunkMeshCPU {
    pub fn face_count(&self) -> usize {
        self.parts.values().map(MeshBuild::face_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.values().all(MeshBuild::is_empty)
    }
}

/// Emits every unobstructed face of every visible voxel, one batch per
/// material, already placed in render space.
pub fn build_chunk_mesh(buf: &ChunkBuf, neighbors: &ChunkNeighbors<'_>) -> ChunkMeshCPU {
    let base_x = buf.base_x();
    let base_z = buf.base_z();
    let mut parts: BTreeMap<MaterialId, MeshBuild> = BTreeMap::new();

    for v in buf.visible_voxels_with(*neighbors) {
        let Some(mid) = v.block.material() else {
            continue;
        };
        let center = voxel_center(base_x + v.x as i32, v.y as i32, base_z + v.z as i32);
        let mb = parts.entry(mid).or_default();
        for face in Face::ALL {
            if buf.face_exposed(v.x, v.y, v.z, face, neighbors) {
                mb.add_face(face, center);
            }
        }
    }

    let lo = voxel_center(base_x, 0, base_z);
    let hi = voxel_center(
        base_x + buf.sx as i32 - 1,
        buf.sy as i32 - 1,
        base_z + buf.sz as i32 - 1,
    );
    let mesh = ChunkMeshCPU {
        coord: buf.coord,
        bbox: Aabb::new(lo, hi).expanded(CUBE_HALF_EXTENT),
        parts,
    };
    log::debug!(
        "meshed chunk {}: {} faces across {} materials",
        buf.coord,
        mesh.face_count(),
        mesh.parts.len()
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::Block;
    use strata_geom::Vec3;

    #[test]
    fn single_voxel_emits_six_faces() {
        let mut buf = ChunkBuf::filled(ChunkCoord::new(0, 0), 3, 3, 3, Block::AIR);
        buf.set_local(1, 1, 1, Block::solid(MaterialId(2)));
        let mesh = build_chunk_mesh(&buf, &ChunkNeighbors::none());
        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(mesh.parts[&MaterialId(2)].face_count(), 6);
    }

    #[test]
    fn shared_faces_are_dropped() {
        let mut buf = ChunkBuf::filled(ChunkCoord::new(0, 0), 4, 4, 4, Block::AIR);
        buf.set_local(1, 1, 1, Block::solid(MaterialId(0)));
        buf.set_local(2, 1, 1, Block::solid(MaterialId(1)));
        let mesh = build_chunk_mesh(&buf, &ChunkNeighbors::none());
        assert_eq!(mesh.face_count(), 10);
        let ids: Vec<_> = mesh.parts.keys().copied().collect();
        assert_eq!(ids, vec![MaterialId(0), MaterialId(1)]);
    }

    #[test]
    fn faces_are_placed_at_world_spacing() {
        let mut buf = ChunkBuf::filled(ChunkCoord::new(1, 0), 2, 2, 2, Block::AIR);
        buf.set_local(0, 0, 0, Block::solid(MaterialId(0)));
        let mesh = build_chunk_mesh(&buf, &ChunkNeighbors::none());
        let verts = &mesh.parts[&MaterialId(0)].verts;
        // chunk origin x = 2, so the voxel centre sits at x = 4
        for v in verts.chunks(5) {
            assert!(v[0] == 3.0 || v[0] == 5.0);
            assert!(v[1] == -1.0 || v[1] == 1.0);
        }
        assert!(mesh.bbox.contains(Vec3::new(4.0, 0.0, 0.0)));
    }
}
