use crate::clock::FrameTime;
use crate::host::{FrameRequest, FrameScheduler, InputSource};
use crate::input::InputQueue;
use crate::orchestrator::{Choreographer, FrameTransforms, OrchestratorState};

struct Attachment {
    scheduler: Box<dyn FrameScheduler>,
    input: Box<dyn InputSource>,
    pending: Option<FrameRequest>,
}

/// Owns the choreography state for one page and its link to the host.
///
/// Typical usage:
/// - Build with `Session::new(choreographer)`
/// - `attach(scheduler, input)` to start receiving frames and input
/// - Call `on_frame(time)` from the scheduler's callback; it ticks once and
///   requests the next frame
/// - `detach()` cancels the pending frame and disconnects input in one step;
///   dropping an attached session does the same
pub struct Session {
    choreographer: Choreographer,
    state: OrchestratorState,
    queue: InputQueue,
    frame: FrameTransforms,
    attachment: Option<Attachment>,
}

impl Session {
    pub fn new(choreographer: Choreographer) -> Self {
        let state = choreographer.initial_state();
        Self {
            choreographer,
            state,
            queue: InputQueue::new(),
            frame: FrameTransforms::default(),
            attachment: None,
        }
    }

    pub fn queue(&self) -> InputQueue {
        self.queue.clone()
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    pub fn choreographer_mut(&mut self) -> &mut Choreographer {
        &mut self.choreographer
    }

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn frame(&self) -> &FrameTransforms {
        &self.frame
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Start receiving input and frames. Re-attaching detaches the previous host first.
    pub fn attach(&mut self, mut scheduler: Box<dyn FrameScheduler>, mut input: Box<dyn InputSource>) {
        self.detach();
        input.connect(self.queue.clone());
        let pending = scheduler.request_frame();
        if pending.is_none() {
            log::warn!("[session] scheduler refused the first frame request");
        }
        self.attachment = Some(Attachment {
            scheduler,
            input,
            pending,
        });
        log::info!("[session] attached");
    }

    /// Cancel the pending frame and disconnect input. Returns false if not attached.
    pub fn detach(&mut self) -> bool {
        let Some(mut attachment) = self.attachment.take() else {
            return false;
        };
        if let Some(request) = attachment.pending.take() {
            attachment.scheduler.cancel_frame(request);
        }
        attachment.input.disconnect();
        log::info!("[session] detached after {} frames", self.state.frames);
        true
    }

    /// Scheduler callback: tick once and request the next frame.
    ///
    /// Returns `None` (and does nothing) when detached, so a stray callback
    /// that was already in flight is harmless.
    pub fn on_frame(&mut self, time: FrameTime) -> Option<&FrameTransforms> {
        let attachment = self.attachment.as_mut()?;
        attachment.pending = None;
        let events = self.queue.drain();
        self.choreographer
            .tick(&mut self.state, time, &events, &mut self.frame);
        attachment.pending = attachment.scheduler.request_frame();
        Some(&self.frame)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.detach();
    }
}
