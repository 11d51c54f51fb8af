//! Headless harness: plays a preset for a fixed number of 60 Hz frames with
//! scripted input and simulated content loading, logging what a renderer
//! would receive.
//!
//! Usage: `cinescroll-native [intro|chapters|particles] [frames]`

use anyhow::{anyhow, Context};
use cinescroll_core::{
    evenly_spaced, Camera, CameraAxis, Choreographer, ContentId, ContentManifest, FollowerBinding,
    FrameClock, FrameRequest, FrameScheduler, FrameSink, FrameTransforms, GroupMotion, InputEvent,
    InputQueue, InputSource, InstanceData, OrbitPath, PresentationConfig, Session,
    SphericalLayoutGenerator, WorldTransform, LEMNISCATE_RADIUS, ORBIT_SPEED,
    SPHERE_CONTENT_COUNT, SPHERE_JITTER, SPHERE_RADIUS, SPHERE_SLOT_COUNT, TORUS_MAJOR_RADIUS,
    TORUS_MINOR_RADIUS, TORUS_SCALE,
};
use glam::DVec3;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

const FRAME_RATE: f64 = 60.0;
const DEFAULT_FRAMES: u64 = 600;
const EXIT_FRAME: u64 = 360;
const LAYOUT_SEED: u64 = 7;
// Content ids the simulated loader drops
const FAILED_CONTENT: [ContentId; 2] = [3, 11];
const LIGHT_OFFSET: DVec3 = DVec3::new(0.0, 0.0, 0.3);

struct FixedStepScheduler {
    next_id: i64,
    pending: Rc<Cell<Option<FrameRequest>>>,
}

impl FrameScheduler for FixedStepScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending.set(Some(request));
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending.get() == Some(request) {
            self.pending.set(None);
        }
    }
}

struct ScriptedInput {
    queue: Rc<RefCell<Option<InputQueue>>>,
}

impl InputSource for ScriptedInput {
    fn connect(&mut self, queue: InputQueue) {
        queue.push(InputEvent::Resize {
            width: 1280.0,
            height: 720.0,
        });
        *self.queue.borrow_mut() = Some(queue);
    }

    fn disconnect(&mut self) {
        self.queue.borrow_mut().take();
    }
}

fn scripted_events(frame: u64, axis: CameraAxis) -> Vec<InputEvent> {
    let mut events = Vec::new();
    match axis {
        CameraAxis::Horizontal => {
            if frame == 30 {
                events.push(InputEvent::ScrollTo { position: 1.0 });
            }
            if frame == 240 {
                events.push(InputEvent::ScrollTo { position: 2.4 });
            }
        }
        CameraAxis::Vertical | CameraAxis::Depth => {
            if (30..60).contains(&frame) {
                events.push(InputEvent::Wheel { delta: 40.0 });
            }
            if (240..255).contains(&frame) {
                events.push(InputEvent::Wheel { delta: -60.0 });
            }
            if frame == EXIT_FRAME {
                events.push(InputEvent::BeginExit);
            }
        }
    }
    let t = frame as f64 / FRAME_RATE;
    events.push(InputEvent::Pointer {
        x: 0.4 * (t * 0.7).sin(),
        y: 0.3 * (t * 0.5).cos(),
    });
    if frame == 120 {
        events.push(InputEvent::Resize {
            width: 800.0,
            height: 600.0,
        });
    }
    events
}

#[derive(Default)]
struct LoggingSink {
    frames: u64,
    peak_intensity: f64,
    instances: Vec<InstanceData>,
    exit_done: bool,
}

impl FrameSink for LoggingSink {
    fn present(&mut self, frame: &FrameTransforms) {
        self.frames += 1;
        self.peak_intensity = self.peak_intensity.max(frame.scroll.intensity);
        self.instances.clear();
        frame.layout_instances(1.0, &mut self.instances);
        frame.trail_instances(&mut self.instances);
        if let Some(exit) = frame.exit {
            if exit.finished && !self.exit_done {
                self.exit_done = true;
                log::info!(
                    "[frame {}] exit finished after {:.2}s, host would navigate now",
                    self.frames,
                    exit.elapsed
                );
            }
        }
        if self.frames % 60 != 0 {
            return;
        }
        let bytes: &[u8] = bytemuck::cast_slice(&self.instances);
        let eye = frame.camera.eye();
        log::info!(
            "[frame {}] t={:.2}s eye=({:.2},{:.2},{:.2}) scroll={:.3} intensity={:.4} section={:?} revealed={} followers={} lights={} layout={} instance_bytes={}",
            self.frames,
            frame.time.elapsed,
            eye.x,
            eye.y,
            eye.z,
            frame.scroll.smoothed_current,
            frame.scroll.intensity,
            frame.section,
            frame.revealed,
            frame.followers.len(),
            frame.dependents.len(),
            frame.layout.len(),
            bytes.len()
        );
    }
}

fn build_followers(choreographer: &mut Choreographer) -> anyhow::Result<()> {
    let torus = OrbitPath::torus(TORUS_MAJOR_RADIUS, TORUS_MINOR_RADIUS, 0.0)?;
    let placements = [
        ((PI * 0.3, 0.0, PI * 0.2), DVec3::new(2.5, -0.4, 0.5)),
        ((-PI * 0.25, PI * 0.1, 0.0), DVec3::new(-2.0, 0.6, -1.0)),
    ];
    for (id, ((rx, ry, rz), position)) in placements.into_iter().enumerate() {
        let transform = WorldTransform::from_euler_xyz(rx, ry, rz, position).with_scale(TORUS_SCALE)?;
        choreographer.add_follower(
            FollowerBinding::new(id as u32, torus, ORBIT_SPEED)?.with_transform(transform),
        );
        choreographer.bind_dependent(id as u32, 100 + id as u32, LIGHT_OFFSET);
    }
    // the second torus model arrives late
    choreographer.set_follower_present(1, false);

    let lemniscate = OrbitPath::lemniscate(LEMNISCATE_RADIUS)?;
    choreographer.add_followers(evenly_spaced(
        lemniscate,
        3,
        ORBIT_SPEED,
        2,
        WorldTransform::IDENTITY,
    )?);
    Ok(())
}

fn install_layout(session: &mut Session, manifest: &ContentManifest) -> anyhow::Result<()> {
    let generator =
        SphericalLayoutGenerator::new(SPHERE_SLOT_COUNT, SPHERE_RADIUS)?.with_jitter(SPHERE_JITTER)?;
    let layout = generator.generate(&manifest.available(), Some(LAYOUT_SEED));
    session
        .choreographer_mut()
        .install_layout(layout, Some(GroupMotion::sphere_intro()?));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "intro".to_string());
    let frames = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("frame count '{arg}' is not a number"))?,
        None => DEFAULT_FRAMES,
    };
    let config = PresentationConfig::from_name(&preset)
        .ok_or_else(|| anyhow!("unknown preset '{preset}' (intro, chapters, particles)"))?;
    let axis = config.camera.axis;
    let fov = config.camera.fov_y_degrees;

    let mut choreographer = Choreographer::new(config)?;
    build_followers(&mut choreographer)?;
    let mut session = Session::new(choreographer);

    let pending = Rc::new(Cell::new(None));
    let connected = Rc::new(RefCell::new(None::<InputQueue>));
    session.attach(
        Box::new(FixedStepScheduler {
            next_id: 0,
            pending: pending.clone(),
        }),
        Box::new(ScriptedInput {
            queue: connected.clone(),
        }),
    );

    let mut manifest = ContentManifest::new(SPHERE_CONTENT_COUNT);
    let mut clock = FrameClock::start();
    let mut sink = LoggingSink::default();

    for n in 1..=frames {
        if pending.take().is_none() {
            log::warn!("no frame pending, stopping at frame {n}");
            break;
        }
        if let Some(queue) = connected.borrow().as_ref() {
            for event in scripted_events(n, axis) {
                queue.push(event);
            }
        }

        // one content item lands every five frames
        if n % 5 == 0 && !manifest.is_settled() {
            let id = (n / 5 - 1) as ContentId;
            let settled = if FAILED_CONTENT.contains(&id) {
                manifest.record_failed(id)
            } else {
                manifest.record_loaded(id)
            };
            if settled {
                install_layout(&mut session, &manifest)?;
            }
        }
        if n == 45 {
            session.choreographer_mut().set_follower_present(1, true);
        }

        let time = clock.advance_to(n as f64 / FRAME_RATE);
        if let Some(frame) = session.on_frame(time) {
            sink.present(frame);
        }
    }

    let last = session.frame();
    let final_intensity = last.scroll.intensity;
    let camera = Camera::from_pose(&last.camera, last.aspect, fov);
    let view_proj = camera.view_projection();
    anyhow::ensure!(
        view_proj.to_cols_array().iter().all(|v| v.is_finite()),
        "camera produced a non-finite view-projection matrix"
    );
    session.detach();

    log::info!(
        "played {} frames of '{}': peak intensity {:.4}, final intensity {:.6}, content {}/{} loaded",
        sink.frames,
        preset,
        sink.peak_intensity,
        final_intensity,
        manifest.available().len(),
        manifest.expected()
    );
    Ok(())
}

