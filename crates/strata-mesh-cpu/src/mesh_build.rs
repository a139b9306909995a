use strata_chunk::Face;
use strata_geom::Vec3;
use strata_render::VERTEX_STRIDE;

use crate::cube::face_vertices;

/// Interleaved `x y z u v` triangle list for one material.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub verts: Vec<f32>,
}

impl MeshBuild {
    /// Appends one cube face centred on `center`.
    pub fn add_face(&mut self, face: Face, center: Vec3) {
        for v in face_vertices(face) {
            self.verts.extend_from_slice(&[
                v[0] + center.x,
                v[1] + center.y,
                v[2] + center.z,
                v[3],
                v[4],
            ]);
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len() / VERTEX_STRIDE
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}
