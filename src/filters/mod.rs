//! Position filters for tablet report streams.
//!
//! The reconstructor undoes firmware EMA smoothing; the exponential
//! smoother applies it and is used to simulate devices.

/// Inverse EMA reconstruction
pub mod reconstructor;

/// Forward exponential smoothing
pub mod exponential;

use crate::constants::{DEFAULT_BIG_MOVEMENT_CUTOFF, DEFAULT_EMA_WEIGHT, DEFAULT_EXPONENTIAL_ALPHA};
use crate::sample::Sample;
use crate::{Error, Result};

pub use reconstructor::{reverse_ema, Reconstructor, ReconstructorState};

/// Trait for all position filters.
///
/// Filters carry per-stream state; start a new stream with a new filter.
pub trait PositionFilter: Send {
    /// Apply filter to the next sample
    fn apply(&mut self, sample: Sample) -> Sample;

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes samples through unchanged
pub struct Passthrough;

impl PositionFilter for Passthrough {
    fn apply(&mut self, sample: Sample) -> Sample {
        sample
    }

    fn name(&self) -> &str {
        "Passthrough"
    }
}

fn parse_param(filter_type: &str, value: Option<&str>, default: f64) -> Result<f64> {
    match value {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::FilterError(format!("Invalid parameter '{raw}' for {filter_type} filter"))),
    }
}

/// Create a position filter from a spec string of the form `name[:param[:param]]`
///
/// # Errors
///
/// Returns `Error::FilterError` for unknown names, unparsable parameters,
/// too many parameters, or an exponential alpha outside (0, 1].
pub fn create_filter(filter_spec: &str) -> Result<Box<dyn PositionFilter>> {
    let mut parts = filter_spec.split(':');
    let name = parts.next().unwrap_or_default().trim().to_lowercase();
    let first = parts.next();
    let second = parts.next();
    if parts.next().is_some() {
        return Err(Error::FilterError(format!("Too many parameters in '{filter_spec}'")));
    }

    match name.as_str() {
        "none" | "passthrough" => {
            if first.is_some() {
                return Err(Error::FilterError(format!("{name} filter takes no parameters")));
            }
            Ok(Box::new(Passthrough))
        }
        "reconstructor" | "reverse_ema" => {
            let weight = parse_param(&name, first, DEFAULT_EMA_WEIGHT)?;
            let cutoff = parse_param(&name, second, DEFAULT_BIG_MOVEMENT_CUTOFF)?;
            Ok(Box::new(Reconstructor::with_params(weight, cutoff)))
        }
        "exponential" | "ema" => {
            if second.is_some() {
                return Err(Error::FilterError("exponential filter takes one parameter".to_string()));
            }
            let alpha = parse_param(&name, first, DEFAULT_EXPONENTIAL_ALPHA)?;
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialSmoother::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {filter_spec}"))),
    }
}
