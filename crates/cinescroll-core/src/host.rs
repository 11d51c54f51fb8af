use crate::input::InputQueue;
use crate::orchestrator::FrameTransforms;

/// Handle for a pending frame callback (e.g. a requestAnimationFrame id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i64);

pub trait FrameScheduler {
    /// Ask for one more frame. `None` when the host cannot schedule.
    fn request_frame(&mut self) -> Option<FrameRequest>;
    fn cancel_frame(&mut self, request: FrameRequest);
}

pub trait InputSource {
    fn connect(&mut self, queue: InputQueue);
    fn disconnect(&mut self);
}

pub trait FrameSink {
    fn present(&mut self, frame: &FrameTransforms);
}
