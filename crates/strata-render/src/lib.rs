//! Backend-agnostic rendering seam: GPU handles, the consumed graphics and
//! windowing interfaces, and a recording backend for tests.
#![forbid(unsafe_code)]

mod backend;
mod error;
mod input;
pub mod recording;

pub use backend::{GeometryHandle, GraphicsBackend, TextureHandle, VERTEX_STRIDE, ViewParams};
pub use error::BackendError;
pub use input::{FrameInput, MoveKeys, WindowingSystem};
pub use recording::{DrawCall, RecordingBackend};
