use crate::error::{ensure_finite, ensure_positive, ConfigError, ConfigResult};
use glam::{DQuat, DVec3, EulerRot};
use std::f64::consts::TAU;

pub type FollowerId = u32;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phase {
    value: f64,
}

impl Phase {
    pub fn new(value: f64) -> Self {
        Self {
            value: wrap_phase(value),
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn advance(&mut self, delta_sec: f64, rate: f64) {
        self.value = wrap_phase(self.value + delta_sec * rate);
    }
}

/// Local-to-world transform of a path's parent, applied scale, rotate, then translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    pub rotation: DQuat,
    pub translation: DVec3,
    pub scale: f64,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WorldTransform {
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
        scale: 1.0,
    };

    pub fn new(rotation: DQuat, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
            scale: 1.0,
        }
    }

    /// Rotation given as XYZ Euler angles, matching a scene-graph parent's `rotation.set(x, y, z)`.
    pub fn from_euler_xyz(x: f64, y: f64, z: f64, translation: DVec3) -> Self {
        Self::new(DQuat::from_euler(EulerRot::XYZ, x, y, z), translation)
    }

    pub fn with_scale(mut self, scale: f64) -> ConfigResult<Self> {
        self.scale = ensure_positive("transform scale", scale)?;
        Ok(self)
    }

    #[inline]
    pub fn apply(&self, local: DVec3) -> DVec3 {
        self.rotation * (local * self.scale) + self.translation
    }
}

/// One evaluation of a path.
///
/// `tangent_hint_rotation` is the heading (radians, from +X toward +Y) of the
/// path tangent in the path's local plane; followers may use it to face
/// along their direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSample {
    pub phase: f64,
    pub position: DVec3,
    pub tangent_hint_rotation: f64,
}

/// Path shapes a follower can travel along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitPath {
    /// Circle on a torus surface: `u` sweeps the long direction, `tube_angle`
    /// (the `v` coordinate) is held fixed.
    TorusSurface {
        major_radius: f64,
        minor_radius: f64,
        tube_angle: f64,
    },
    /// Gerono lemniscate (figure-eight) in the local XY plane.
    Lemniscate { radius: f64 },
}

impl OrbitPath {
    pub fn torus(major_radius: f64, minor_radius: f64, tube_angle: f64) -> ConfigResult<Self> {
        ensure_positive("torus major radius", major_radius)?;
        ensure_positive("torus minor radius", minor_radius)?;
        ensure_finite("torus tube angle", tube_angle)?;
        Ok(Self::TorusSurface {
            major_radius,
            minor_radius,
            tube_angle,
        })
    }

    pub fn lemniscate(radius: f64) -> ConfigResult<Self> {
        ensure_positive("lemniscate radius", radius)?;
        Ok(Self::Lemniscate { radius })
    }

    pub fn local_position(&self, phase: f64) -> DVec3 {
        match *self {
            OrbitPath::TorusSurface {
                major_radius,
                minor_radius,
                tube_angle,
            } => {
                let (sin_v, cos_v) = tube_angle.sin_cos();
                let ring = major_radius + minor_radius * cos_v;
                let (sin_u, cos_u) = phase.sin_cos();
                DVec3::new(ring * cos_u, ring * sin_u, minor_radius * sin_v)
            }
            OrbitPath::Lemniscate { radius } => {
                let (sin_t, cos_t) = phase.sin_cos();
                DVec3::new(radius * sin_t, radius * sin_t * cos_t, 0.0)
            }
        }
    }

    /// Derivative of the local position with respect to phase.
    fn local_tangent(&self, phase: f64) -> DVec3 {
        match *self {
            OrbitPath::TorusSurface {
                major_radius,
                minor_radius,
                tube_angle,
            } => {
                let ring = major_radius + minor_radius * tube_angle.cos();
                let (sin_u, cos_u) = phase.sin_cos();
                DVec3::new(-ring * sin_u, ring * cos_u, 0.0)
            }
            OrbitPath::Lemniscate { radius } => {
                DVec3::new(radius * phase.cos(), radius * (2.0 * phase).cos(), 0.0)
            }
        }
    }

    pub fn sample(&self, phase: f64) -> OrbitSample {
        self.sample_in(phase, &WorldTransform::IDENTITY)
    }

    /// Sample and carry the result into world space through `transform`.
    pub fn sample_in(&self, phase: f64, transform: &WorldTransform) -> OrbitSample {
        let phase = wrap_phase(phase);
        let tangent = self.local_tangent(phase);
        OrbitSample {
            phase,
            position: transform.apply(self.local_position(phase)),
            tangent_hint_rotation: tangent.y.atan2(tangent.x),
        }
    }
}

/// A follower travelling a path at `speed` radians per second, shifted by `phase_offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowerBinding {
    pub follower_id: FollowerId,
    pub path: OrbitPath,
    pub phase_offset: f64,
    pub speed: f64,
    pub transform: WorldTransform,
}

impl FollowerBinding {
    pub fn new(follower_id: FollowerId, path: OrbitPath, speed: f64) -> ConfigResult<Self> {
        Ok(Self {
            follower_id,
            path,
            phase_offset: 0.0,
            speed: ensure_finite("follower speed", speed)?,
            transform: WorldTransform::IDENTITY,
        })
    }

    pub fn with_offset(mut self, phase_offset: f64) -> ConfigResult<Self> {
        self.phase_offset = ensure_finite("phase offset", phase_offset)?;
        Ok(self)
    }

    pub fn with_transform(mut self, transform: WorldTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sample at the shared group phase (before this follower's offset).
    #[inline]
    pub fn sample(&self, phase: f64) -> OrbitSample {
        self.path.sample_in(phase + self.phase_offset, &self.transform)
    }
}

/// `count` followers on one path, offsets spaced evenly over 2π, ids from `first_id`.
pub fn evenly_spaced(
    path: OrbitPath,
    count: usize,
    speed: f64,
    first_id: FollowerId,
    transform: WorldTransform,
) -> ConfigResult<Vec<FollowerBinding>> {
    if count == 0 {
        return Err(ConfigError::EmptyFollowerGroup);
    }
    (0..count)
        .map(|k| {
            let offset = TAU * k as f64 / count as f64;
            Ok(FollowerBinding::new(first_id + k as FollowerId, path, speed)?
                .with_offset(offset)?
                .with_transform(transform))
        })
        .collect()
}
