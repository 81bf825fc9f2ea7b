//! Inverse EMA reconstruction.
//!
//! Many tablets smooth their position reports in firmware with
//! `s_t = w * raw_t + (1 - w) * s_{t-1}`. Given two consecutive smoothed
//! samples and `w`, the raw sample is recovered as
//! `raw_t = (s_t - s_{t-1}) / w + s_{t-1}`.

use super::PositionFilter;
use crate::constants::{
    CUTOFF_DISABLED, DEFAULT_BIG_MOVEMENT_CUTOFF, DEFAULT_EMA_WEIGHT, EMA_WEIGHT_MAX, EMA_WEIGHT_MIN,
    MIN_EFFECTIVE_WEIGHT,
};
use crate::sample::Sample;
use log::{debug, warn};

/// Whether the reconstructor has seen a sample yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructorState {
    /// No previous sample, the next one passes through
    Uninitialized,
    /// Previous smoothed sample is known
    Tracking,
}

/// Reverse a single EMA step.
///
/// Returns `current` unchanged when `cutoff` is enabled and the movement
/// from `last` exceeds it. A `weight` of exactly 0 is inverted as
/// [`MIN_EFFECTIVE_WEIGHT`]; any positive weight is used as given.
#[must_use]
pub fn reverse_ema(current: Sample, last: Sample, weight: f64, cutoff: f64) -> Sample {
    if cutoff != CUTOFF_DISABLED && current.distance(last) > cutoff {
        debug!("Movement {} -> {} exceeds cutoff {}, passed through", last, current, cutoff);
        return current;
    }
    if weight >= EMA_WEIGHT_MAX {
        return current;
    }
    let weight = if weight == 0.0 { MIN_EFFECTIVE_WEIGHT } else { weight };
    (current - last) / weight + last
}

/// Per-stream reconstruction filter.
///
/// Holds the last smoothed sample it was fed, never its own output, so each
/// inversion chains against what the device actually reported.
#[derive(Debug, Clone)]
pub struct Reconstructor {
    weight: f64,
    cutoff: f64,
    last_smoothed: Option<Sample>,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconstructor {
    /// Create a reconstructor with the default weight (0.5) and cutoff disabled
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(DEFAULT_EMA_WEIGHT, DEFAULT_BIG_MOVEMENT_CUTOFF)
    }

    /// Create a reconstructor with the given parameters, clamped like the setters
    #[must_use]
    pub fn with_params(weight: f64, cutoff: f64) -> Self {
        let mut reconstructor = Self {
            weight: DEFAULT_EMA_WEIGHT,
            cutoff: DEFAULT_BIG_MOVEMENT_CUTOFF,
            last_smoothed: None,
        };
        reconstructor.set_weight(weight);
        reconstructor.set_cutoff(cutoff);
        reconstructor
    }

    /// EMA weight of the smoothing being reversed
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Movement cutoff, `-1` when disabled
    #[must_use]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    #[must_use]
    pub fn is_cutoff_enabled(&self) -> bool {
        self.cutoff != CUTOFF_DISABLED
    }

    /// Previous smoothed input, if any
    #[must_use]
    pub fn last_smoothed(&self) -> Option<Sample> {
        self.last_smoothed
    }

    #[must_use]
    pub fn state(&self) -> ReconstructorState {
        match self.last_smoothed {
            Some(_) => ReconstructorState::Tracking,
            None => ReconstructorState::Uninitialized,
        }
    }

    /// Set the EMA weight, clamped into `[0, 1]`. NaN is ignored.
    pub fn set_weight(&mut self, weight: f64) {
        if weight.is_nan() {
            warn!("Ignoring NaN EMA weight, keeping {}", self.weight);
            return;
        }
        self.weight = weight.clamp(EMA_WEIGHT_MIN, EMA_WEIGHT_MAX);
        debug!("EMA weight set to {}", self.weight);
    }

    /// Set the movement cutoff. `-1` disables it, anything else is clamped to `>= 0`.
    /// NaN is ignored.
    pub fn set_cutoff(&mut self, cutoff: f64) {
        if cutoff.is_nan() {
            warn!("Ignoring NaN movement cutoff, keeping {}", self.cutoff);
            return;
        }
        self.cutoff = if cutoff == CUTOFF_DISABLED { cutoff } else { cutoff.max(0.0) };
        debug!("Big movement cutoff set to {}", self.cutoff);
    }

    /// Reconstruct the pre-smoothing position for `current`
    pub fn process(&mut self, current: Sample) -> Sample {
        let output = match self.last_smoothed {
            Some(last) => reverse_ema(current, last, self.weight, self.cutoff),
            None => current,
        };
        self.last_smoothed = Some(current);
        output
    }
}

impl PositionFilter for Reconstructor {
    fn apply(&mut self, sample: Sample) -> Sample {
        self.process(sample)
    }

    fn name(&self) -> &str {
        "Reconstructor"
    }
}
