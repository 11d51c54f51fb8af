use crate::events::{viewport_size, DomInputSource, ScrollMode};
use crate::scheduler::{FrameSlot, RafScheduler};
use cinescroll_core::{
    evenly_spaced, CameraAxis, Choreographer, ContentId, ContentManifest, FollowerBinding,
    FollowerId, FrameClock, GroupMotion, InputEvent, InstanceData, OrbitPath, ParticleField,
    PresentationConfig, Session, SphericalLayoutGenerator, WorldTransform, SPHERE_JITTER,
    SPHERE_RADIUS, SPHERE_SLOT_COUNT, STAR_PALETTE,
};
use glam::DVec3;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys as web;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// One scroll-choreographed page, driven by `requestAnimationFrame`.
///
/// JS builds the scene description (followers, lights, expected content),
/// calls `attach()`, and reads flat transform buffers from the `on_frame`
/// callback to apply to its scene graph.
#[wasm_bindgen]
pub struct WebPresentation {
    session: Rc<RefCell<Session>>,
    clock: Rc<RefCell<FrameClock>>,
    on_frame: Rc<RefCell<Option<js_sys::Function>>>,
    slot: FrameSlot,
    in_frame: Rc<Cell<bool>>,
    manifest: Option<ContentManifest>,
    layout_seed: u64,
    next_follower: FollowerId,
}

#[wasm_bindgen]
impl WebPresentation {
    /// `preset` is one of `intro`, `chapters` or `particles`.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<WebPresentation, JsValue> {
        let config = PresentationConfig::from_name(preset)
            .ok_or_else(|| JsValue::from_str(&format!("unknown preset '{preset}'")))?;
        let choreographer = Choreographer::new(config).map_err(js_error)?;
        Ok(Self {
            session: Rc::new(RefCell::new(Session::new(choreographer))),
            clock: Rc::new(RefCell::new(FrameClock::start())),
            on_frame: Rc::new(RefCell::new(None)),
            slot: Rc::new(RefCell::new(None)),
            in_frame: Rc::new(Cell::new(false)),
            manifest: None,
            layout_seed: random_seed(),
            next_follower: 0,
        })
    }

    /// `count` followers evenly spaced on a figure-eight centred at (x, y, z).
    /// Returns the first follower id; the rest follow consecutively.
    pub fn add_lemniscate_group(
        &mut self,
        count: u32,
        radius: f64,
        speed: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<u32, JsValue> {
        let path = OrbitPath::lemniscate(radius).map_err(js_error)?;
        let transform = WorldTransform::new(glam::DQuat::IDENTITY, DVec3::new(x, y, z));
        let first = self.next_follower;
        let bindings =
            evenly_spaced(path, count as usize, speed, first, transform).map_err(js_error)?;
        self.take_follower_ids(count);
        self.session
            .borrow_mut()
            .choreographer_mut()
            .add_followers(bindings);
        Ok(first)
    }

    /// One follower circling a torus whose parent is rotated (XYZ Euler),
    /// scaled and placed at (x, y, z).
    #[allow(clippy::too_many_arguments)]
    pub fn add_torus_follower(
        &mut self,
        major_radius: f64,
        minor_radius: f64,
        tube_angle: f64,
        speed: f64,
        rx: f64,
        ry: f64,
        rz: f64,
        x: f64,
        y: f64,
        z: f64,
        scale: f64,
    ) -> Result<u32, JsValue> {
        let path = OrbitPath::torus(major_radius, minor_radius, tube_angle).map_err(js_error)?;
        let transform = WorldTransform::from_euler_xyz(rx, ry, rz, DVec3::new(x, y, z))
            .with_scale(scale)
            .map_err(js_error)?;
        let id = self.next_follower;
        let binding = FollowerBinding::new(id, path, speed)
            .map_err(js_error)?
            .with_transform(transform);
        self.take_follower_ids(1);
        self.session
            .borrow_mut()
            .choreographer_mut()
            .add_follower(binding);
        Ok(id)
    }

    /// Make scene element `element` (a light) track `follower` at an offset.
    pub fn bind_light(&mut self, follower: u32, element: u32, ox: f64, oy: f64, oz: f64) {
        self.session
            .borrow_mut()
            .choreographer_mut()
            .bind_dependent(follower, element, DVec3::new(ox, oy, oz));
    }

    /// Hide or show a follower, e.g. while its model is still loading.
    pub fn set_follower_present(&mut self, follower: u32, present: bool) {
        self.session
            .borrow_mut()
            .choreographer_mut()
            .set_follower_present(follower, present);
    }

    /// Expect `count` content items (ids `0..count`). The image sphere is laid
    /// out once every item has loaded or failed.
    pub fn expect_content(&mut self, count: u32, seed: Option<u32>) -> Result<(), JsValue> {
        if let Some(seed) = seed {
            self.layout_seed = seed as u64;
        }
        let manifest = ContentManifest::new(count as usize);
        let settled = manifest.is_settled();
        self.manifest = Some(manifest);
        if settled {
            self.install_layout().map_err(js_error)?;
        }
        Ok(())
    }

    /// Returns true when this report completed the content set.
    pub fn content_loaded(&mut self, id: u32) -> Result<bool, JsValue> {
        self.report(id, true)
    }

    pub fn content_failed(&mut self, id: u32) -> Result<bool, JsValue> {
        self.report(id, false)
    }

    /// Called after every tick; read transforms from inside it.
    pub fn set_on_frame(&mut self, callback: Option<js_sys::Function>) {
        *self.on_frame.borrow_mut() = callback;
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if self.slot.borrow().is_none() {
            let session = self.session.clone();
            let clock = self.clock.clone();
            let on_frame = self.on_frame.clone();
            let in_frame = self.in_frame.clone();
            *self.slot.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
                let time = clock.borrow_mut().tick();
                let ticked = session.borrow_mut().on_frame(time).is_some();
                if !ticked {
                    return;
                }
                // cloned out so the callback may call set_on_frame or detach
                let callback = on_frame.borrow().clone();
                if let Some(f) = callback {
                    in_frame.set(true);
                    if let Err(e) = f.call0(&JsValue::NULL) {
                        log::error!("[web] on_frame callback threw: {:?}", e);
                    }
                    in_frame.set(false);
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let mode = match self.session.borrow().choreographer().config().camera.axis {
            CameraAxis::Horizontal => ScrollMode::PageHorizontal,
            CameraAxis::Vertical | CameraAxis::Depth => ScrollMode::Wheel,
        };
        let scheduler = RafScheduler::new(window.clone(), self.slot.clone());
        let input = DomInputSource::new(window, mode);
        self.session
            .borrow_mut()
            .attach(Box::new(scheduler), Box::new(input));
        Ok(())
    }

    /// Stop ticking and remove every DOM listener. Safe to call from `on_frame`.
    pub fn detach(&mut self) -> bool {
        self.session.borrow_mut().detach()
    }

    pub fn is_attached(&self) -> bool {
        self.session.borrow().is_attached()
    }

    /// Feed a wheel delta (pixels) directly, for hosts that own their listeners.
    pub fn push_wheel(&self, delta: f64) {
        self.session.borrow().queue().push(InputEvent::Wheel { delta });
    }

    pub fn push_scroll(&self, position: f64) {
        self.session
            .borrow()
            .queue()
            .push(InputEvent::ScrollTo { position });
    }

    pub fn push_pointer(&self, x: f64, y: f64) {
        self.session
            .borrow()
            .queue()
            .push(InputEvent::Pointer { x, y });
    }

    /// Start the page's exit animation. Poll `exit_finished()` before navigating.
    pub fn begin_exit(&self) {
        self.session.borrow().queue().push(InputEvent::BeginExit);
    }

    /// Seconds since the exit began, if it has.
    pub fn exit_elapsed(&self) -> Option<f64> {
        self.session.borrow().frame().exit.map(|e| e.elapsed)
    }

    pub fn exit_finished(&self) -> bool {
        self.session
            .borrow()
            .frame()
            .exit
            .is_some_and(|e| e.finished)
    }

    pub fn viewport(&self) -> Vec<f64> {
        web::window()
            .map(|w| {
                let (width, height) = viewport_size(&w);
                vec![width, height]
            })
            .unwrap_or_default()
    }

    /// `[x, y, z]` of the scroll-driven camera followed by the parallax group offset.
    pub fn camera(&self) -> Vec<f64> {
        let session = self.session.borrow();
        let pose = session.frame().camera;
        vec![
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.parallax.x,
            pose.parallax.y,
            pose.parallax.z,
        ]
    }

    pub fn aspect(&self) -> f64 {
        self.session.borrow().frame().aspect
    }

    pub fn intensity(&self) -> f64 {
        self.session.borrow().frame().scroll.intensity
    }

    pub fn smoothed_scroll(&self) -> f64 {
        self.session.borrow().frame().scroll.smoothed_current
    }

    pub fn section(&self) -> Option<i32> {
        self.session.borrow().frame().section.map(|s| s as i32)
    }

    pub fn revealed(&self) -> bool {
        self.session.borrow().frame().revealed
    }

    pub fn trail_offsets(&self) -> Vec<f64> {
        let session = self.session.borrow();
        session
            .frame()
            .trail_offsets
            .iter()
            .flat_map(|o| o.to_array())
            .collect()
    }

    /// `[id, phase, x, y, z, heading]` per visible follower.
    pub fn followers(&self) -> Vec<f64> {
        let session = self.session.borrow();
        let mut out = Vec::with_capacity(session.frame().followers.len() * 6);
        for f in &session.frame().followers {
            out.extend_from_slice(&[
                f.follower_id as f64,
                f.phase,
                f.position.x,
                f.position.y,
                f.position.z,
                f.tangent_hint_rotation,
            ]);
        }
        out
    }

    /// `[element, x, y, z]` per bound light.
    pub fn dependents(&self) -> Vec<f64> {
        let session = self.session.borrow();
        let mut out = Vec::with_capacity(session.frame().dependents.len() * 4);
        for d in &session.frame().dependents {
            out.extend_from_slice(&[d.element_id as f64, d.position.x, d.position.y, d.position.z]);
        }
        out
    }

    /// `[content, x, y, z, qx, qy, qz, qw]` per placed element.
    pub fn layout(&self) -> Vec<f64> {
        let session = self.session.borrow();
        let mut out = Vec::with_capacity(session.frame().layout.len() * 8);
        for e in &session.frame().layout {
            out.push(e.content_id as f64);
            out.extend_from_slice(&e.position.to_array());
            out.extend_from_slice(&e.rotation.to_array());
        }
        out
    }

    /// Layout planes then trail copies as packed `InstanceData` floats,
    /// ready to upload as an instance buffer.
    pub fn instance_buffer(&self, plane_scale: f32) -> Vec<f32> {
        let session = self.session.borrow();
        let mut instances: Vec<InstanceData> = Vec::new();
        session.frame().layout_instances(plane_scale, &mut instances);
        session.frame().trail_instances(&mut instances);
        bytemuck::cast_slice(&instances).to_vec()
    }

    /// Seeded star field, `[x, y, z, r, g, b]` per particle.
    pub fn scatter_particles(&self, count: u32, extent: f64, seed: u32) -> Vec<f32> {
        let field = ParticleField::scatter(
            count as usize,
            DVec3::splat(extent),
            &STAR_PALETTE,
            seed as u64,
        );
        field
            .positions
            .iter()
            .zip(&field.colors)
            .flat_map(|(p, c)| [p.x, p.y, p.z, c[0], c[1], c[2]])
            .collect()
    }
}

impl WebPresentation {
    fn take_follower_ids(&mut self, count: u32) -> FollowerId {
        let first = self.next_follower;
        self.next_follower += count;
        first
    }

    fn report(&mut self, id: ContentId, loaded: bool) -> Result<bool, JsValue> {
        let manifest = self
            .manifest
            .as_mut()
            .ok_or_else(|| JsValue::from_str("expect_content() was not called"))?;
        let settled = if loaded {
            manifest.record_loaded(id)
        } else {
            manifest.record_failed(id)
        };
        if settled {
            self.install_layout().map_err(js_error)?;
        }
        Ok(settled)
    }

    fn install_layout(&mut self) -> anyhow::Result<()> {
        let available = self
            .manifest
            .as_ref()
            .map(ContentManifest::available)
            .unwrap_or_default();
        let generator = SphericalLayoutGenerator::new(SPHERE_SLOT_COUNT, SPHERE_RADIUS)?
            .with_jitter(SPHERE_JITTER)?;
        let layout = generator.generate(&available, Some(self.layout_seed));
        let motion = GroupMotion::sphere_intro()?;
        log::info!(
            "[web] content settled: {} available, layout seed {}",
            available.len(),
            self.layout_seed
        );
        self.session
            .borrow_mut()
            .choreographer_mut()
            .install_layout(layout, Some(motion));
        Ok(())
    }
}

// The frame closure holds the session, and while attached the session's
// scheduler holds the closure slot. Both links are cut here.
impl Drop for WebPresentation {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.detach();
        }
        let Some(closure) = self.slot.borrow_mut().take() else {
            return;
        };
        if self.in_frame.get() {
            // freed from inside on_frame; the closure is still on the stack
            closure.forget();
        }
    }
}
