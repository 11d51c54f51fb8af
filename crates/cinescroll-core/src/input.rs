use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Plain numeric input, already detached from any DOM/device event.
///
/// - `Wheel`: relative scroll delta in wheel units (pixels)
/// - `ScrollTo`: absolute scroll position in presentation units
/// - `Pointer`: pointer position normalized to roughly [-0.5, 0.5] per axis
/// - `Resize`: new viewport size in CSS pixels
/// - `BeginExit`: start the page's exit animation (ignored if it has none)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Wheel { delta: f64 },
    ScrollTo { position: f64 },
    Pointer { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    BeginExit,
}

pub type FrameEvents = SmallVec<[InputEvent; 8]>;

/// Append-only event queue shared between input handlers and the frame loop.
///
/// Both sides run on the same thread; handlers push, the frame drains.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn drain(&self) -> FrameEvents {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
