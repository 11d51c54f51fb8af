//! Single-pole exponential smoothing.
//!
//! The law is `current + (target - current) * factor`. With a constant target
//! the distance shrinks by `(1 - factor)` every step, so the value converges
//! monotonically and never overshoots.

use crate::error::{ConfigError, ConfigResult};

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// Use this for runtime factors (e.g. `rate * dt`); configured factors go
/// through [`SmoothingFilter`] so they are validated once.
#[inline]
pub fn lerp_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Exponential low-pass filter with a factor validated to lie in (0, 1].
///
/// `factor = 1` is a pass-through; smaller values add lag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingFilter {
    factor: f64,
}

impl SmoothingFilter {
    pub fn new(factor: f64) -> ConfigResult<Self> {
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(ConfigError::SmoothingFactor(factor));
        }
        Ok(Self { factor })
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn update(&self, current: f64, target: f64) -> f64 {
        lerp_toward(current, target, self.factor)
    }

    /// Effective factor for a frame lasting `delta_sec`, treating the
    /// configured factor as a per-frame weight at `reference_rate` Hz.
    ///
    /// Equals the configured factor at `delta_sec == 1 / reference_rate`.
    /// Non-positive (or NaN) deltas give 0 so the value holds still.
    pub fn factor_for_frame(&self, delta_sec: f64, reference_rate: f64) -> f64 {
        if delta_sec.is_nan() || delta_sec <= 0.0 {
            return 0.0;
        }
        let frames = delta_sec * reference_rate;
        1.0 - (1.0 - self.factor).powf(frames)
    }

    #[inline]
    pub fn update_for_frame(
        &self,
        current: f64,
        target: f64,
        delta_sec: f64,
        reference_rate: f64,
    ) -> f64 {
        lerp_toward(
            current,
            target,
            self.factor_for_frame(delta_sec, reference_rate),
        )
    }
}
