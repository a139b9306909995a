use strata_geom::{Mat4, Vec3};

use crate::error::BackendError;

/// Floats per vertex in geometry passed to [`GraphicsBackend::create_geometry`]: `x y z u v`.
pub const VERTEX_STRIDE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub u32);

/// Per-frame camera state handed to the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub view: Mat4,
    pub projection: Mat4,
}

/// GPU-side collaborator. Implementations own the actual device objects;
/// callers only ever hold the opaque handles.
pub trait GraphicsBackend {
    /// Uploads an interleaved triangle list (`VERTEX_STRIDE` floats per vertex).
    fn create_geometry(&mut self, vertices: &[f32]) -> Result<GeometryHandle, BackendError>;

    /// Decodes and uploads encoded image bytes (PNG etc).
    fn create_texture(&mut self, image_bytes: &[u8]) -> Result<TextureHandle, BackendError>;

    fn submit_draw(&mut self, geometry: GeometryHandle, model: Mat4, texture: TextureHandle);

    fn release_geometry(&mut self, handle: GeometryHandle);

    fn release_texture(&mut self, handle: TextureHandle);

    fn begin_frame(&mut self, _view: &ViewParams) {}

    fn end_frame(&mut self) {}
}

impl<B: GraphicsBackend + ?Sized> GraphicsBackend for &mut B {
    fn create_geometry(&mut self, vertices: &[f32]) -> Result<GeometryHandle, BackendError> {
        (**self).create_geometry(vertices)
    }

    fn create_texture(&mut self, image_bytes: &[u8]) -> Result<TextureHandle, BackendError> {
        (**self).create_texture(image_bytes)
    }

    fn submit_draw(&mut self, geometry: GeometryHandle, model: Mat4, texture: TextureHandle) {
        (**self).submit_draw(geometry, model, texture)
    }

    fn release_geometry(&mut self, handle: GeometryHandle) {
        (**self).release_geometry(handle)
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        (**self).release_texture(handle)
    }

    fn begin_frame(&mut self, view: &ViewParams) {
        (**self).begin_frame(view)
    }

    fn end_frame(&mut self) {
        (**self).end_frame()
    }
}
