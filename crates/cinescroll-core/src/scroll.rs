use crate::constants::{REFERENCE_FRAME_RATE, SCROLL_DAMPING, WHEEL_SENSITIVITY};
use crate::error::{ensure_finite, ensure_positive, ConfigError, ConfigResult};
use crate::smoothing::{lerp_toward, SmoothingFilter};

/// Snapshot of the scroll driver after a tick.
///
/// `intensity` is always `|smoothed_current - smoothed_previous|`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub raw_position: f64,
    pub smoothed_previous: f64,
    pub smoothed_current: f64,
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBounds {
    min: f64,
    max: f64,
}

impl ScrollBounds {
    pub fn new(min: f64, max: f64) -> ConfigResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::ScrollBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Tuning for a [`ScrollIntensityTracker`].
///
/// - `start`: initial raw and smoothed position
/// - `damping`: per-reference-frame smoothing factor in (0, 1]
/// - `sensitivity`: multiplier applied to every input delta
/// - `bounds`: optional clamp for the raw accumulator
/// - `reference_frame_rate`: when set, damping is scaled by frame duration;
///   when `None` every tick applies `damping` once regardless of `dt`
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    pub start: f64,
    pub damping: f64,
    pub sensitivity: f64,
    pub bounds: Option<ScrollBounds>,
    pub reference_frame_rate: Option<f64>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            damping: SCROLL_DAMPING,
            sensitivity: WHEEL_SENSITIVITY,
            bounds: None,
            reference_frame_rate: Some(REFERENCE_FRAME_RATE),
        }
    }
}

/// Raw accumulator plus a chained pair of smoothed values.
///
/// Input handlers call [`push_delta`](Self::push_delta) or
/// [`set_position`](Self::set_position) any number of times; the frame loop
/// calls [`tick`](Self::tick) once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollIntensityTracker {
    state: ScrollState,
    filter: SmoothingFilter,
    sensitivity: f64,
    bounds: Option<ScrollBounds>,
    reference_frame_rate: Option<f64>,
}

impl ScrollIntensityTracker {
    pub fn new(config: &ScrollConfig) -> ConfigResult<Self> {
        let filter = SmoothingFilter::new(config.damping)?;
        if !config.sensitivity.is_finite() || config.sensitivity == 0.0 {
            return Err(ConfigError::Sensitivity(config.sensitivity));
        }
        if let Some(rate) = config.reference_frame_rate {
            ensure_positive("reference frame rate", rate)?;
        }
        let start = ensure_finite("scroll start", config.start)?;
        let start = config.bounds.map_or(start, |b| b.clamp(start));
        Ok(Self {
            state: ScrollState {
                raw_position: start,
                smoothed_previous: start,
                smoothed_current: start,
                intensity: 0.0,
            },
            filter,
            sensitivity: config.sensitivity,
            bounds: config.bounds,
            reference_frame_rate: config.reference_frame_rate,
        })
    }

    pub fn push_delta(&mut self, delta: f64) {
        if !delta.is_finite() {
            log::debug!("[scroll] ignoring non-finite delta {delta}");
            return;
        }
        let raw = self.state.raw_position + delta * self.sensitivity;
        self.state.raw_position = self.clamped(raw);
    }

    pub fn set_position(&mut self, position: f64) {
        if !position.is_finite() {
            log::debug!("[scroll] ignoring non-finite position {position}");
            return;
        }
        self.state.raw_position = self.clamped(position);
    }

    /// Advance the smoothed pair by one frame lasting `delta_sec`.
    pub fn tick(&mut self, delta_sec: f64) -> ScrollState {
        let factor = match self.reference_frame_rate {
            Some(rate) => self.filter.factor_for_frame(delta_sec, rate),
            None => self.filter.factor(),
        };
        let s = &mut self.state;
        s.smoothed_previous = s.smoothed_current;
        s.smoothed_current = lerp_toward(s.smoothed_current, s.raw_position, factor);
        s.intensity = (s.smoothed_previous - s.smoothed_current).abs();
        *s
    }

    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.state.intensity
    }

    #[inline]
    pub fn smoothed(&self) -> f64 {
        self.state.smoothed_current
    }

    #[inline]
    pub fn raw(&self) -> f64 {
        self.state.raw_position
    }

    #[inline]
    pub fn bounds(&self) -> Option<ScrollBounds> {
        self.bounds
    }

    #[inline]
    fn clamped(&self, value: f64) -> f64 {
        self.bounds.map_or(value, |b| b.clamp(value))
    }
}
