//! In-memory backend that records every call. Used by tests and benches.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use strata_geom::Mat4;

use crate::backend::{GeometryHandle, GraphicsBackend, TextureHandle, VERTEX_STRIDE, ViewParams};
use crate::error::BackendError;
use crate::input::{FrameInput, WindowingSystem};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub geometry: GeometryHandle,
    pub model: Mat4,
    pub texture: TextureHandle,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    live_geometry: BTreeMap<u32, usize>,
    live_textures: BTreeSet<u32>,
    /// Draws submitted since the last `end_frame`.
    pub draws: Vec<DrawCall>,
    /// Completed frames, oldest first.
    pub frames: Vec<Vec<DrawCall>>,
    pub views: Vec<ViewParams>,
    pub geometry_created: usize,
    pub textures_created: usize,
    pub geometry_released: usize,
    pub textures_released: usize,
    /// Releases of handles that were never created or already released.
    pub invalid_releases: usize,
    fail_texture_at: Option<usize>,
    fail_geometry_at: Option<usize>,
    inputs: VecDeque<FrameInput>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `n`th (0-based) `create_texture` call fail.
    pub fn failing_texture_at(mut self, n: usize) -> Self {
        self.fail_texture_at = Some(n);
        self
    }

    /// Makes the `n`th (0-based) `create_geometry` call fail.
    pub fn failing_geometry_at(mut self, n: usize) -> Self {
        self.fail_geometry_at = Some(n);
        self
    }

    /// Queues scripted input; once exhausted `poll_input` reports a close request.
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = FrameInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn live_geometry(&self) -> usize {
        self.live_geometry.len()
    }

    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    /// Vertex count of a live geometry handle.
    pub fn geometry_vertices(&self, handle: GeometryHandle) -> Option<usize> {
        self.live_geometry.get(&handle.0).copied()
    }

    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_geometry(&mut self, vertices: &[f32]) -> Result<GeometryHandle, BackendError> {
        let attempt = self.geometry_created;
        self.geometry_created += 1;
        if self.fail_geometry_at == Some(attempt) {
            return Err(BackendError::GeometryUpload {
                reason: format!("injected failure on geometry #{attempt}"),
            });
        }
        if vertices.is_empty() || vertices.len() % VERTEX_STRIDE != 0 {
            return Err(BackendError::GeometryUpload {
                reason: format!("{} floats is not a whole number of vertices", vertices.len()),
            });
        }
        let id = self.alloc_id();
        self.live_geometry.insert(id, vertices.len() / VERTEX_STRIDE);
        Ok(GeometryHandle(id))
    }

    fn create_texture(&mut self, image_bytes: &[u8]) -> Result<TextureHandle, BackendError> {
        let attempt = self.textures_created;
        self.textures_created += 1;
        if self.fail_texture_at == Some(attempt) || image_bytes.is_empty() {
            return Err(BackendError::TextureDecode {
                reason: format!("texture #{attempt} rejected"),
            });
        }
        let id = self.alloc_id();
        self.live_textures.insert(id);
        Ok(TextureHandle(id))
    }

    fn submit_draw(&mut self, geometry: GeometryHandle, model: Mat4, texture: TextureHandle) {
        self.draws.push(DrawCall {
            geometry,
            model,
            texture,
        });
    }

    fn release_geometry(&mut self, handle: GeometryHandle) {
        if self.live_geometry.remove(&handle.0).is_some() {
            self.geometry_released += 1;
        } else {
            self.invalid_releases += 1;
        }
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if self.live_textures.remove(&handle.0) {
            self.textures_released += 1;
        } else {
            self.invalid_releases += 1;
        }
    }

    fn begin_frame(&mut self, view: &ViewParams) {
        self.views.push(*view);
        self.draws.clear();
    }

    fn end_frame(&mut self) {
        let frame = std::mem::take(&mut self.draws);
        self.frames.push(frame);
    }
}

impl WindowingSystem for RecordingBackend {
    fn poll_input(&mut self) -> FrameInput {
        self.inputs.pop_front().unwrap_or(FrameInput {
            close_requested: true,
            ..FrameInput::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_counted_once() {
        let mut b = RecordingBackend::new();
        let g = b.create_geometry(&[0.0; VERTEX_STRIDE * 3]).unwrap();
        let t = b.create_texture(&[1, 2, 3]).unwrap();
        b.release_geometry(g);
        b.release_geometry(g);
        b.release_texture(t);
        assert_eq!(b.geometry_released, 1);
        assert_eq!(b.textures_released, 1);
        assert_eq!(b.invalid_releases, 1);
        assert_eq!(b.live_geometry() + b.live_textures(), 0);
    }

    #[test]
    fn injected_texture_failure() {
        let mut b = RecordingBackend::new().failing_texture_at(1);
        assert!(b.create_texture(&[1]).is_ok());
        assert!(matches!(
            b.create_texture(&[1]),
            Err(BackendError::TextureDecode { .. })
        ));
        assert!(b.create_texture(&[1]).is_ok());
    }

    #[test]
    fn ragged_geometry_is_rejected() {
        let mut b = RecordingBackend::new();
        assert!(b.create_geometry(&[0.0; 7]).is_err());
        assert!(b.create_geometry(&[]).is_err());
    }

    #[test]
    fn exhausted_input_requests_close() {
        let mut b = RecordingBackend::new().with_inputs([FrameInput {
            delta_time: 0.016,
            ..FrameInput::default()
        }]);
        assert!(!b.poll_input().close_requested);
        assert!(b.poll_input().close_requested);
    }
}
