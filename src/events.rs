use crate::input;
use cinescroll_core::{InputEvent, InputQueue, InputSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// How the page turns user scrolling into scroll input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    /// Raw wheel deltas; the page itself does not scroll.
    Wheel,
    /// Native horizontal page scroll, reported in viewport widths. Vertical
    /// wheel turns are redirected into horizontal scrolling.
    PageHorizontal,
}

struct Listener {
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

pub struct DomInputSource {
    window: web::Window,
    mode: ScrollMode,
    listeners: Vec<Listener>,
}

impl DomInputSource {
    pub fn new(window: web::Window, mode: ScrollMode) -> Self {
        Self {
            window,
            mode,
            listeners: Vec::new(),
        }
    }

    fn listen(&mut self, kind: &'static str, handler: impl FnMut(web::Event) + 'static) {
        self.listen_with(kind, None, handler);
    }

    fn listen_with(
        &mut self,
        kind: &'static str,
        options: Option<&web::AddEventListenerOptions>,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let callback = closure.as_ref().unchecked_ref();
        let added = match options {
            Some(options) => self
                .window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    kind, callback, options,
                ),
            None => self.window.add_event_listener_with_callback(kind, callback),
        };
        if let Err(e) = added {
            log::error!("[input] failed to add {kind} listener: {:?}", e);
            return;
        }
        self.listeners.push(Listener { kind, closure });
    }
}

pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn page_scroll_width(window: &web::Window) -> f64 {
    window
        .document()
        .and_then(|d| d.body())
        .map_or(0.0, |body| body.scroll_width() as f64)
}

fn page_scroll(window: &web::Window) -> Option<f64> {
    let (width, _) = viewport_size(window);
    input::chapter_scroll_position(window.scroll_x().ok()?, width)
}

impl InputSource for DomInputSource {
    fn connect(&mut self, queue: InputQueue) {
        self.disconnect();

        let (width, height) = viewport_size(&self.window);
        queue.push(InputEvent::Resize { width, height });

        match self.mode {
            ScrollMode::Wheel => {
                let q = queue.clone();
                let window = self.window.clone();
                self.listen("wheel", move |ev| {
                    let Some(wheel) = ev.dyn_ref::<web::WheelEvent>() else {
                        return;
                    };
                    let (_, page_height) = viewport_size(&window);
                    let delta =
                        input::wheel_delta_pixels(wheel.delta_y(), wheel.delta_mode(), page_height);
                    q.push(InputEvent::Wheel { delta });
                });
            }
            ScrollMode::PageHorizontal => {
                if let Some(position) = page_scroll(&self.window) {
                    queue.push(InputEvent::ScrollTo { position });
                }
                let q = queue.clone();
                let window = self.window.clone();
                self.listen("scroll", move |_ev| {
                    if let Some(position) = page_scroll(&window) {
                        q.push(InputEvent::ScrollTo { position });
                    }
                });

                // non-passive so the vertical scroll can be cancelled
                let options = web::AddEventListenerOptions::new();
                options.set_passive(false);
                let window = self.window.clone();
                self.listen_with("wheel", Some(&options), move |ev| {
                    let Some(wheel) = ev.dyn_ref::<web::WheelEvent>() else {
                        return;
                    };
                    let (width, height) = viewport_size(&window);
                    let delta =
                        input::wheel_delta_pixels(wheel.delta_y(), wheel.delta_mode(), height);
                    if let Some(step) =
                        input::horizontal_scroll_step(delta, page_scroll_width(&window), width)
                    {
                        ev.prevent_default();
                        window.scroll_by_with_x_and_y(step, 0.0);
                    }
                });
            }
        }

        let q = queue.clone();
        let window = self.window.clone();
        self.listen("pointermove", move |ev| {
            let Some(pointer) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            if let Some((x, y)) = input::normalized_pointer(
                pointer.client_x() as f64,
                pointer.client_y() as f64,
                width,
                height,
            ) {
                q.push(InputEvent::Pointer { x, y });
            }
        });

        let q = queue;
        let window = self.window.clone();
        self.listen("resize", move |_ev| {
            let (width, height) = viewport_size(&window);
            q.push(InputEvent::Resize { width, height });
        });

        log::info!("[input] connected {} listeners ({:?})", self.listeners.len(), self.mode);
    }

    fn disconnect(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = self.window.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                log::warn!("[input] failed to remove {} listener: {:?}", listener.kind, e);
            }
        }
    }
}
