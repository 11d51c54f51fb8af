//! The per-frame choreography step.
//!
//! `Choreographer` holds what a page declares (configuration, followers,
//! dependent lights, the placed layout). `OrchestratorState` holds what changes
//! frame to frame. `tick` reads both and writes a flat [`FrameTransforms`]
//! for the renderer; it performs no I/O and cannot fail.

use crate::clock::FrameTime;
use crate::config::PresentationConfig;
use crate::error::ConfigResult;
use crate::input::InputEvent;
use crate::layout::{ContentId, SphereLayout};
use crate::orbit::{FollowerBinding, FollowerId, Phase, WorldTransform};
use crate::scroll::{ScrollIntensityTracker, ScrollState};
use crate::smoothing::lerp_toward;
use crate::state::CameraPose;
use crate::tween::{ExitMotion, GroupMotion};
use fnv::{FnvHashMap, FnvHashSet};
use glam::{DQuat, DVec2, DVec3};
use smallvec::SmallVec;

pub type ElementId = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Dependent {
    element: ElementId,
    offset: DVec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowerTransform {
    pub follower_id: FollowerId,
    pub phase: f64,
    pub position: DVec3,
    pub tangent_hint_rotation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DependentTransform {
    pub element_id: ElementId,
    pub follower_id: FollowerId,
    pub position: DVec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementTransform {
    pub index: usize,
    pub content_id: ContentId,
    pub position: DVec3,
    pub rotation: DQuat,
}

/// How far the exit animation has run. `finished` tells the host it may leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitProgress {
    pub elapsed: f64,
    pub finished: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameTransforms {
    pub time: FrameTime,
    pub scroll: ScrollState,
    pub camera: CameraPose,
    pub aspect: f64,
    pub trail_offsets: Vec<DVec3>,
    pub followers: Vec<FollowerTransform>,
    pub dependents: Vec<DependentTransform>,
    pub layout: Vec<ElementTransform>,
    pub section: Option<i64>,
    pub revealed: bool,
    pub exit: Option<ExitProgress>,
}

impl FrameTransforms {
    pub fn clear(&mut self) {
        self.trail_offsets.clear();
        self.followers.clear();
        self.dependents.clear();
        self.layout.clear();
        self.section = None;
        self.revealed = false;
        self.exit = None;
    }

    pub fn follower(&self, id: FollowerId) -> Option<&FollowerTransform> {
        self.followers.iter().find(|f| f.follower_id == id)
    }

    pub fn dependent(&self, id: ElementId) -> Option<&DependentTransform> {
        self.dependents.iter().find(|d| d.element_id == id)
    }
}

#[derive(Clone, Debug)]
pub struct OrchestratorState {
    pub scroll: ScrollIntensityTracker,
    pub pointer: DVec2,
    pub parallax: DVec3,
    pub phases: Vec<Phase>,
    pub elapsed: f64,
    pub aspect: f64,
    pub frames: u64,
    layout_started_at: Option<(u64, f64)>,
    exit_requested: bool,
    exit: Option<ExitRun>,
}

#[derive(Clone, Copy, Debug)]
struct ExitRun {
    started: f64,
    motion: ExitMotion,
    group: WorldTransform,
}

impl OrchestratorState {
    /// Fold one input event into the state. Safe to call between ticks.
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { delta } => self.scroll.push_delta(delta),
            InputEvent::ScrollTo { position } => self.scroll.set_position(position),
            InputEvent::Pointer { x, y } => {
                if x.is_finite() && y.is_finite() {
                    self.pointer = DVec2::new(x, y);
                }
            }
            InputEvent::Resize { width, height } => {
                if width > 0.0 && height > 0.0 {
                    self.aspect = width / height;
                }
            }
            InputEvent::BeginExit => self.exit_requested = true,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }
}

#[derive(Clone, Debug)]
struct LayoutStage {
    layout: SphereLayout,
    motion: Option<GroupMotion>,
    generation: u64,
}

pub struct Choreographer {
    config: PresentationConfig,
    tracker: ScrollIntensityTracker,
    followers: Vec<FollowerBinding>,
    absent: FnvHashSet<FollowerId>,
    dependents: FnvHashMap<FollowerId, SmallVec<[Dependent; 4]>>,
    stage: Option<LayoutStage>,
    exit: Option<ExitMotion>,
}

impl Choreographer {
    pub fn new(config: PresentationConfig) -> ConfigResult<Self> {
        let tracker = config.validate()?;
        log::info!(
            "[choreo] preset={} axis={:?} trail={} parallax={}",
            config.name,
            config.camera.axis,
            config.trail.count,
            config.parallax.is_some()
        );
        let exit = config.exit.as_ref().map(ExitMotion::new).transpose()?;
        Ok(Self {
            config,
            tracker,
            followers: Vec::new(),
            absent: FnvHashSet::default(),
            dependents: FnvHashMap::default(),
            stage: None,
            exit,
        })
    }

    #[inline]
    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn followers(&self) -> &[FollowerBinding] {
        &self.followers
    }

    pub fn initial_state(&self) -> OrchestratorState {
        OrchestratorState {
            scroll: self.tracker.clone(),
            pointer: DVec2::ZERO,
            parallax: DVec3::ZERO,
            phases: vec![Phase::default(); self.followers.len()],
            elapsed: 0.0,
            aspect: self.config.initial_aspect,
            frames: 0,
            layout_started_at: None,
            exit_requested: false,
            exit: None,
        }
    }

    pub fn add_follower(&mut self, binding: FollowerBinding) {
        self.followers.push(binding);
    }

    pub fn add_followers(&mut self, bindings: impl IntoIterator<Item = FollowerBinding>) {
        self.followers.extend(bindings);
    }

    /// Make `element` copy `follower`'s position (plus `offset`) every frame.
    pub fn bind_dependent(&mut self, follower: FollowerId, element: ElementId, offset: DVec3) {
        self.dependents
            .entry(follower)
            .or_default()
            .push(Dependent { element, offset });
    }

    /// Mark a follower absent (its model never arrived) or present again.
    pub fn set_follower_present(&mut self, follower: FollowerId, present: bool) {
        if present {
            self.absent.remove(&follower);
        } else {
            self.absent.insert(follower);
        }
    }

    /// Install a generated layout. Motion, if any, starts on the next tick.
    pub fn install_layout(&mut self, layout: SphereLayout, motion: Option<GroupMotion>) {
        log::info!(
            "[choreo] layout installed: {}/{} elements",
            layout.len(),
            layout.target_count()
        );
        let generation = self.stage.as_ref().map_or(0, |s| s.generation + 1);
        self.stage = Some(LayoutStage {
            layout,
            motion,
            generation,
        });
    }

    pub fn layout(&self) -> Option<&SphereLayout> {
        self.stage.as_ref().map(|s| &s.layout)
    }

    pub fn tick(
        &self,
        state: &mut OrchestratorState,
        time: FrameTime,
        input: &[InputEvent],
        out: &mut FrameTransforms,
    ) {
        out.clear();
        state.elapsed = time.elapsed;
        state.frames += 1;

        // Phases
        state.phases.resize(self.followers.len(), Phase::default());
        for (phase, binding) in state.phases.iter_mut().zip(&self.followers) {
            phase.advance(time.delta, binding.speed);
        }

        // Scroll
        for event in input {
            state.apply_input(*event);
        }
        let scroll = state.scroll.tick(time.delta);

        // Camera
        let rig = &self.config.camera;
        let axis = rig.axis.unit();
        let mut position = rig.base + axis * (scroll.smoothed_current * rig.scale);
        if std::mem::take(&mut state.exit_requested) && state.exit.is_none() {
            match self.exit {
                Some(motion) => {
                    let group = self.group_pose(state, time.elapsed);
                    log::info!("[choreo] exit started at {:.2}s", time.elapsed);
                    state.exit = Some(ExitRun {
                        started: time.elapsed,
                        motion: motion.starting_from(group.translation.x, position.dot(axis)),
                        group,
                    });
                }
                None => log::debug!("[choreo] {} has no exit; ignoring", self.config.name),
            }
        }
        // Scroll no longer drives the camera once the exit has begun.
        if let Some(run) = &state.exit {
            let t = time.elapsed - run.started;
            position += axis * (run.motion.camera.sample(t) - position.dot(axis));
            out.exit = Some(ExitProgress {
                elapsed: t,
                finished: run.motion.is_finished(t),
            });
        }
        if let Some(p) = self.config.parallax {
            let target = DVec3::new(state.pointer.x * p.gain, -state.pointer.y * p.gain, 0.0);
            let factor = (p.rate * time.delta).clamp(0.0, 1.0);
            state.parallax = DVec3::new(
                lerp_toward(state.parallax.x, target.x, factor),
                lerp_toward(state.parallax.y, target.y, factor),
                lerp_toward(state.parallax.z, target.z, factor),
            );
        }
        out.camera = CameraPose {
            position,
            parallax: state.parallax,
        };

        // Trail
        let trail = &self.config.trail;
        let stretch = trail.spacing * scroll.intensity;
        out.trail_offsets
            .extend((0..trail.count).map(|i| trail.axis * (i as f64 * stretch)));

        // Followers and their dependents
        for (binding, phase) in self.followers.iter().zip(&state.phases) {
            if self.absent.contains(&binding.follower_id) {
                continue;
            }
            let sample = binding.sample(phase.value());
            out.followers.push(FollowerTransform {
                follower_id: binding.follower_id,
                phase: sample.phase,
                position: sample.position,
                tangent_hint_rotation: sample.tangent_hint_rotation,
            });
            if let Some(deps) = self.dependents.get(&binding.follower_id) {
                out.dependents.extend(deps.iter().map(|d| DependentTransform {
                    element_id: d.element,
                    follower_id: binding.follower_id,
                    position: sample.position + d.offset,
                }));
            }
        }

        // Layout group
        if let Some(stage) = &self.stage {
            let group = match state.exit {
                Some(run) => run.motion.group_at(&run.group, time.elapsed - run.started),
                None => self.group_pose(state, time.elapsed),
            };
            out.layout.extend(stage.layout.points().iter().map(|p| ElementTransform {
                index: p.index,
                content_id: p.source_content_id,
                position: group.apply(p.position),
                rotation: group.rotation * p.rotation,
            }));
        }

        out.time = time;
        out.scroll = scroll;
        out.aspect = state.aspect;
        if self.config.track_sections {
            out.section = Some(scroll.raw_position.round() as i64);
        }
        if let Some(threshold) = self.config.reveal_below {
            out.revealed = position.dot(axis) < threshold;
        }
    }

    /// Pose of the layout group under its one-shot motion. The motion clock
    /// starts the first time a given layout generation is seen.
    fn group_pose(&self, state: &mut OrchestratorState, elapsed: f64) -> WorldTransform {
        let Some(stage) = &self.stage else {
            return WorldTransform::default();
        };
        let started = match state.layout_started_at {
            Some((generation, at)) if generation == stage.generation => at,
            _ => {
                state.layout_started_at = Some((stage.generation, elapsed));
                elapsed
            }
        };
        stage
            .motion
            .map(|m| m.transform_at(elapsed - started))
            .unwrap_or_default()
    }
}
