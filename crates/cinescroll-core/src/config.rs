use crate::constants::*;
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ConfigResult};
use crate::scroll::{ScrollBounds, ScrollConfig, ScrollIntensityTracker};
use crate::tween::ExitMotion;
use glam::DVec3;

/// Which camera axis the smoothed scroll value drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraAxis {
    Vertical,
    Horizontal,
    Depth,
}

impl CameraAxis {
    pub fn unit(self) -> DVec3 {
        match self {
            CameraAxis::Vertical => DVec3::Y,
            CameraAxis::Horizontal => DVec3::X,
            CameraAxis::Depth => DVec3::Z,
        }
    }
}

/// Camera placement: `base + axis * (smoothed_scroll * scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub axis: CameraAxis,
    pub base: DVec3,
    pub scale: f64,
    pub fov_y_degrees: f64,
}

/// Pointer parallax: the camera's parent group is pulled toward
/// `(x * gain, -y * gain)` at `rate` per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    pub gain: f64,
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub count: usize,
    pub spacing: f64,
    pub axis: DVec3,
}

impl TrailConfig {
    pub const NONE: Self = Self {
        count: 0,
        spacing: TRAIL_SPACING,
        axis: DVec3::X,
    };
}

/// One-shot exit: after `delay`, slide the layout group to `group_x` and ease
/// the camera's axis coordinate to `camera_target`. `finish_after` is when the
/// host may leave the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitConfig {
    pub delay: f64,
    pub group_x: f64,
    pub group_duration: f64,
    pub camera_target: f64,
    pub camera_duration: f64,
    pub finish_after: f64,
}

impl ExitConfig {
    pub const SPHERE: Self = Self {
        delay: EXIT_DELAY_SEC,
        group_x: SPHERE_EXIT_X,
        group_duration: SPHERE_EXIT_SEC,
        camera_target: CAMERA_EXIT_DEPTH,
        camera_duration: CAMERA_EXIT_SEC,
        finish_after: EXIT_FINISH_SEC,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct PresentationConfig {
    pub name: &'static str,
    pub scroll: ScrollConfig,
    pub camera: CameraRig,
    pub parallax: Option<ParallaxConfig>,
    pub trail: TrailConfig,
    pub track_sections: bool,
    /// Flag frames where the camera's axis coordinate is below this value.
    pub reveal_below: Option<f64>,
    pub exit: Option<ExitConfig>,
    pub initial_aspect: f64,
}

impl PresentationConfig {
    /// Landing page: dolly through the image sphere along Z, clamped so the
    /// camera never passes through the shell or drifts out of the scene.
    pub fn intro_sphere() -> Self {
        Self {
            name: "intro",
            scroll: ScrollConfig {
                start: INTRO_SCROLL_START,
                bounds: ScrollBounds::new(INTRO_SCROLL_MIN, INTRO_SCROLL_MAX).ok(),
                ..ScrollConfig::default()
            },
            camera: CameraRig {
                axis: CameraAxis::Depth,
                base: DVec3::ZERO,
                scale: 1.0,
                fov_y_degrees: DEFAULT_FOV_DEGREES,
            },
            parallax: None,
            trail: TrailConfig {
                count: INTRO_TRAIL_COUNT,
                spacing: TRAIL_SPACING,
                axis: DVec3::Z,
            },
            track_sections: false,
            reveal_below: Some(INTRO_REVEAL_DEPTH),
            exit: Some(ExitConfig::SPHERE),
            initial_aspect: 16.0 / 9.0,
        }
    }

    /// Horizontal chapter strip. Input is page scroll divided by viewport
    /// width, so one unit is one chapter.
    pub fn chapters() -> Self {
        Self {
            name: "chapters",
            scroll: ScrollConfig {
                sensitivity: 1.0,
                ..ScrollConfig::default()
            },
            camera: CameraRig {
                axis: CameraAxis::Horizontal,
                base: DVec3::new(0.0, 0.0, CHAPTER_CAMERA_Z),
                scale: CHAPTER_OBJECTS_DISTANCE,
                fov_y_degrees: CHAPTER_FOV_DEGREES,
            },
            parallax: Some(ParallaxConfig {
                gain: PARALLAX_GAIN,
                rate: PARALLAX_RATE,
            }),
            trail: TrailConfig::NONE,
            track_sections: true,
            reveal_below: None,
            exit: None,
            initial_aspect: 16.0 / 9.0,
        }
    }

    pub fn particle_field() -> Self {
        Self {
            name: "particles",
            scroll: ScrollConfig::default(),
            camera: CameraRig {
                axis: CameraAxis::Depth,
                base: DVec3::new(0.0, 0.0, PARTICLE_CAMERA_Z),
                scale: PARTICLE_SCROLL_SCALE,
                fov_y_degrees: DEFAULT_FOV_DEGREES,
            },
            parallax: None,
            trail: TrailConfig {
                count: PARTICLE_TRAIL_COUNT,
                spacing: TRAIL_SPACING,
                axis: DVec3::X,
            },
            track_sections: false,
            reveal_below: None,
            exit: None,
            initial_aspect: 16.0 / 9.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "intro" | "sphere" => Some(Self::intro_sphere()),
            "chapters" => Some(Self::chapters()),
            "particles" | "particle-field" => Some(Self::particle_field()),
            _ => None,
        }
    }

    /// Check every tunable; the scroll tracker is built as part of the check.
    pub fn validate(&self) -> ConfigResult<ScrollIntensityTracker> {
        let tracker = ScrollIntensityTracker::new(&self.scroll)?;
        ensure_finite("camera scale", self.camera.scale)?;
        ensure_positive("camera field of view", self.camera.fov_y_degrees)?;
        ensure_positive("initial aspect", self.initial_aspect)?;
        if let Some(p) = self.parallax {
            ensure_finite("parallax gain", p.gain)?;
            ensure_positive("parallax rate", p.rate)?;
        }
        ensure_non_negative("trail spacing", self.trail.spacing)?;
        if let Some(t) = self.reveal_below {
            ensure_finite("reveal threshold", t)?;
        }
        if let Some(exit) = &self.exit {
            ExitMotion::new(exit)?;
        }
        Ok(tracker)
    }
}
