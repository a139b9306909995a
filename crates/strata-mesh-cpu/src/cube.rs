use strata_chunk::Face;
use strata_render::VERTEX_STRIDE;

pub const CUBE_VERTEX_COUNT: usize = 36;

// Corners per face, counter-clockwise seen from outside: bottom-left,
// bottom-right, top-right, top-left. V is 0 at the image's top row.
const FACE_CORNERS: [[[f32; 5]; 4]; 6] = [
    // PosY
    [
        [-1.0, 1.0, 1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0, 1.0, 0.0],
        [-1.0, 1.0, -1.0, 0.0, 0.0],
    ],
    // NegY
    [
        [-1.0, -1.0, -1.0, 0.0, 1.0],
        [1.0, -1.0, -1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0, 1.0, 0.0],
        [-1.0, -1.0, 1.0, 0.0, 0.0],
    ],
    // PosX
    [
        [1.0, -1.0, 1.0, 0.0, 1.0],
        [1.0, -1.0, -1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0, 1.0, 0.0],
        [1.0, 1.0, 1.0, 0.0, 0.0],
    ],
    // NegX
    [
        [-1.0, -1.0, -1.0, 0.0, 1.0],
        [-1.0, -1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, -1.0, 0.0, 0.0],
    ],
    // PosZ
    [
        [-1.0, -1.0, 1.0, 0.0, 1.0],
        [1.0, -1.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, 1.0, 0.0, 0.0],
    ],
    // NegZ
    [
        [1.0, -1.0, -1.0, 0.0, 1.0],
        [-1.0, -1.0, -1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0, 1.0, 0.0],
        [1.0, 1.0, -1.0, 0.0, 0.0],
    ],
];

const TRIANGLE_ORDER: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Two triangles for one face of the unit cube, interleaved `x y z u v`.
pub fn face_vertices(face: Face) -> [[f32; VERTEX_STRIDE]; 6] {
    let corners = &FACE_CORNERS[face.index()];
    TRIANGLE_ORDER.map(|i| corners[i])
}

/// The full 36-vertex unit cube, faces in `Face::ALL` order.
pub fn cube_vertices() -> Vec<f32> {
    let mut out = Vec::with_capacity(CUBE_VERTEX_COUNT * VERTEX_STRIDE);
    for face in Face::ALL {
        for v in face_vertices(face) {
            out.extend_from_slice(&v);
        }
    }
    out
}
