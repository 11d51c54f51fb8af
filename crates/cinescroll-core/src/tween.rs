use crate::config::ExitConfig;
use crate::constants::{sphere_start_vec3, SPHERE_FLY_IN_SEC, SPHERE_SPIN_SEC};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ConfigResult};
use crate::orbit::WorldTransform;
use glam::{DQuat, DVec3};
use std::f64::consts::TAU;

/// Easing curves applied to normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Map `t` in [0, 1] (clamped) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for DVec3 {
    #[inline]
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    delay: f64,
    duration: f64,
    ease: Ease,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: f64) -> ConfigResult<Self> {
        Ok(Self {
            from,
            to,
            delay: 0.0,
            duration: ensure_positive("tween duration", duration)?,
            ease: Ease::Linear,
        })
    }

    pub fn with_delay(mut self, delay: f64) -> ConfigResult<Self> {
        self.delay = ensure_non_negative("tween delay", delay)?;
        Ok(self)
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Same timing and easing, starting from a live value.
    pub fn starting_from(mut self, from: T) -> Self {
        self.from = from;
        self
    }

    pub fn sample(&self, elapsed: f64) -> T {
        let t = (elapsed - self.delay) / self.duration;
        self.from.interpolate(self.to, self.ease.apply(t))
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.delay + self.duration
    }
}

/// Group motion: a position tween plus a spin about the group's Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupMotion {
    pub position: Tween<DVec3>,
    pub spin_y: Tween<f64>,
}

impl GroupMotion {
    /// Fly in from the side and spin once, as the intro image sphere does once
    /// its textures have arrived.
    pub fn sphere_intro() -> ConfigResult<Self> {
        Ok(Self {
            position: Tween::new(sphere_start_vec3(), DVec3::ZERO, SPHERE_FLY_IN_SEC)?
                .with_ease(Ease::Power2Out),
            spin_y: Tween::new(0.0, TAU, SPHERE_SPIN_SEC)?.with_ease(Ease::Power2InOut),
        })
    }

    pub fn transform_at(&self, elapsed: f64) -> WorldTransform {
        WorldTransform::new(
            DQuat::from_rotation_y(self.spin_y.sample(elapsed)),
            self.position.sample(elapsed),
        )
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        self.position.is_finished(elapsed) && self.spin_y.is_finished(elapsed)
    }
}

/// Exit choreography: the group slides along X and the camera eases to a
/// fixed coordinate on its rig axis, both from wherever they are when the
/// exit begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitMotion {
    pub group_x: Tween<f64>,
    pub camera: Tween<f64>,
    pub finish_after: f64,
}

impl ExitMotion {
    pub fn new(config: &ExitConfig) -> ConfigResult<Self> {
        ensure_finite("exit group target", config.group_x)?;
        ensure_finite("exit camera target", config.camera_target)?;
        Ok(Self {
            group_x: Tween::new(0.0, config.group_x, config.group_duration)?
                .with_delay(config.delay)?
                .with_ease(Ease::Power2InOut),
            camera: Tween::new(0.0, config.camera_target, config.camera_duration)?
                .with_delay(config.delay)?
                .with_ease(Ease::Power2InOut),
            finish_after: ensure_non_negative("exit finish time", config.finish_after)?,
        })
    }

    /// The intro page's exit: sphere off to the left, camera pushed in.
    pub fn sphere_exit() -> ConfigResult<Self> {
        Self::new(&ExitConfig::SPHERE)
    }

    /// Bind to the live group pose and camera coordinate.
    pub fn starting_from(mut self, group_x: f64, camera: f64) -> Self {
        self.group_x = self.group_x.starting_from(group_x);
        self.camera = self.camera.starting_from(camera);
        self
    }

    pub fn group_at(&self, pose: &WorldTransform, elapsed: f64) -> WorldTransform {
        let mut group = *pose;
        group.translation.x = self.group_x.sample(elapsed);
        group
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.finish_after
    }
}
