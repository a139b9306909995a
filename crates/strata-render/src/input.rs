/// Boolean key state for the four movement keys (W, S, A, D).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the frame loop reads from the window for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Pointer movement since the previous frame, y grows downward.
    pub pointer_delta: (f32, f32),
    pub keys: MoveKeys,
    pub close_requested: bool,
}

pub trait WindowingSystem {
    /// Pumps window events and returns this frame's input snapshot.
    fn poll_input(&mut self) -> FrameInput;
}

impl<W: WindowingSystem + ?Sized> WindowingSystem for &mut W {
    fn poll_input(&mut self) -> FrameInput {
        (**self).poll_input()
    }
}
