use cinescroll_core::{FrameRequest, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// Shared slot holding the animation-frame closure.
///
/// The presentation owns one reference for its whole lifetime, so detaching
/// from inside the callback never drops the closure that is running.
pub type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

pub struct RafScheduler {
    window: web::Window,
    slot: FrameSlot,
}

impl RafScheduler {
    pub fn new(window: web::Window, slot: FrameSlot) -> Self {
        Self { window, slot }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let slot = self.slot.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameRequest(id as i64)),
            Err(e) => {
                log::error!("[raf] request_animation_frame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Err(e) = self.window.cancel_animation_frame(request.0 as i32) {
            log::warn!("[raf] cancel_animation_frame failed: {:?}", e);
        }
    }
}
