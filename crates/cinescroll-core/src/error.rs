//! Configuration errors.
//!
//! Everything here is raised at construction time. Per-frame code never fails;
//! bad values are rejected before a single frame runs rather than clamped.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing factor must be in (0, 1], got {0}")]
    SmoothingFactor(f64),
    #[error("scroll sensitivity must be finite and non-zero, got {0}")]
    Sensitivity(f64),
    #[error("scroll bounds must be finite with min <= max, got [{min}, {max}]")]
    ScrollBounds { min: f64, max: f64 },
    #[error("layout target count must be at least 1")]
    EmptyLayout,
    #[error("follower group needs at least one follower")]
    EmptyFollowerGroup,
    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f64 },
    #[error("{what} must be finite and not negative, got {value}")]
    Negative { what: &'static str, value: f64 },
    #[error("{what} must be finite, got {value}")]
    NotFinite { what: &'static str, value: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn ensure_positive(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

pub(crate) fn ensure_non_negative(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { what, value })
    }
}

pub(crate) fn ensure_finite(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { what, value })
    }
}
