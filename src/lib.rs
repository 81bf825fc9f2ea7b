//! Tablet position reconstruction.
//!
//! Many digitizers smooth their position reports with an exponential moving
//! average before the host ever sees them. This library reverses that
//! smoothing sample by sample:
//!
//! - [`filters::Reconstructor`] inverts one EMA step per sample
//! - [`pipeline::ReconstructorElement`] runs it over a stream of device reports
//! - [`config`] loads parameters from YAML and exposes them as named properties
//!
//! # Examples
//!
//! ## Reconstructing samples
//!
//! ```
//! use tablet_reconstructor::{filters::Reconstructor, Sample};
//!
//! let mut filter = Reconstructor::with_params(0.5, -1.0);
//!
//! // First sample has nothing to invert against
//! assert_eq!(filter.process(Sample::new(0.0, 0.0)), Sample::new(0.0, 0.0));
//!
//! // A half-weight EMA only moved halfway, so the raw step was twice as long
//! assert_eq!(filter.process(Sample::new(10.0, 0.0)), Sample::new(20.0, 0.0));
//! ```
//!
//! ## Running in a pipeline
//!
//! ```
//! use tablet_reconstructor::pipeline::{DeviceReport, PipelineElement, ReconstructorElement};
//! use tablet_reconstructor::Sample;
//!
//! # fn main() -> tablet_reconstructor::Result<()> {
//! let mut element = ReconstructorElement::default();
//! element.set_property("Big Movement Cutoff", 50.0)?;
//!
//! let mut downstream: Vec<DeviceReport> = Vec::new();
//! element.consume(DeviceReport::at(Sample::new(100.0, 100.0)), &mut downstream);
//! element.consume(DeviceReport::OutOfRange, &mut downstream);
//! assert_eq!(downstream.len(), 2);
//! # Ok(())
//! # }
//! ```

/// 2D position sample
pub mod sample;

/// Position filters, including the reconstructor
pub mod filters;

/// Device reports and pipeline stages
pub mod pipeline;

/// Error types and result handling
pub mod error;

/// Constants used throughout the crate
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
pub use sample::Sample;
