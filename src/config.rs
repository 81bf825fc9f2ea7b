//! Configuration management for the reconstructor.
//!
//! Settings can come from a YAML file or be set at runtime through the
//! named-property surface a host UI exposes.

use crate::constants::{
    BIG_MOVEMENT_CUTOFF_TOOLTIP, CUTOFF_DISABLED, DEFAULT_BIG_MOVEMENT_CUTOFF, DEFAULT_EMA_WEIGHT,
    EMA_WEIGHT_TOOLTIP, PROPERTY_BIG_MOVEMENT_CUTOFF, PROPERTY_EMA_WEIGHT,
};
use crate::filters::{create_filter, PositionFilter, Reconstructor};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reconstruction parameters
    pub reconstructor: ReconstructorConfig,

    /// Pipeline configuration
    pub pipeline: PipelineConfig,
}

/// Reconstructor parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructorConfig {
    /// Weight of the firmware EMA being reversed (0.0-1.0]
    pub ema_weight: f64,

    /// Movement distance above which reversal is skipped, -1 to disable
    pub big_movement_cutoff: f64,
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter spec, e.g. `reconstructor` or `exponential:0.3`
    pub filter: String,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            ema_weight: DEFAULT_EMA_WEIGHT,
            big_movement_cutoff: DEFAULT_BIG_MOVEMENT_CUTOFF,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: "reconstructor".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::Yaml` if the text does not parse
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a reconstructor from the configured parameters
    #[must_use]
    pub fn build_reconstructor(&self) -> Reconstructor {
        Reconstructor::with_params(self.reconstructor.ema_weight, self.reconstructor.big_movement_cutoff)
    }

    /// True when the configured filter is the reconstructor
    #[must_use]
    pub fn uses_reconstructor(&self) -> bool {
        matches!(
            self.pipeline.filter.trim().to_lowercase().as_str(),
            "reconstructor" | "reverse_ema"
        )
    }

    /// Create a filter from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` if the filter spec is not recognised
    pub fn create_filter(&self) -> Result<Box<dyn PositionFilter>> {
        if self.uses_reconstructor() {
            Ok(Box::new(self.build_reconstructor()))
        } else {
            create_filter(&self.pipeline.filter)
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a zero weight, `Error::ConfigError`
    /// for other out-of-range values, or the filter factory's error
    pub fn validate(&self) -> Result<()> {
        let weight = self.reconstructor.ema_weight;
        if weight == 0.0 {
            return Err(Error::InvalidParameter(
                "EMA weight of 0 cannot be inverted".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(Error::ConfigError(format!(
                "EMA weight must be between 0.0 and 1.0, got {weight}"
            )));
        }

        let cutoff = self.reconstructor.big_movement_cutoff;
        if cutoff.is_nan() || (cutoff != CUTOFF_DISABLED && cutoff < 0.0) {
            return Err(Error::ConfigError(format!(
                "Big movement cutoff must be -1 or non-negative, got {cutoff}"
            )));
        }

        self.create_filter().map(|_| ())
    }
}

/// Description of one host-visible setting
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// Display name
    pub name: &'static str,
    /// Current value
    pub value: f64,
    /// Default value
    pub default: f64,
    /// Help text
    pub tooltip: &'static str,
}

/// Named numeric settings a host can list and change between samples
pub trait Properties {
    /// All settings with their current values
    fn properties(&self) -> Vec<PropertyInfo>;

    /// Set a property by display name
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownProperty` if `name` is not exposed
    fn set_property(&mut self, name: &str, value: f64) -> Result<()>;

    /// Read a property by display name
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownProperty` if `name` is not exposed
    fn property(&self, name: &str) -> Result<f64> {
        self.properties()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
            .ok_or_else(|| Error::UnknownProperty(name.to_string()))
    }
}

impl Properties for Reconstructor {
    fn properties(&self) -> Vec<PropertyInfo> {
        vec![
            PropertyInfo {
                name: PROPERTY_EMA_WEIGHT,
                value: self.weight(),
                default: DEFAULT_EMA_WEIGHT,
                tooltip: EMA_WEIGHT_TOOLTIP,
            },
            PropertyInfo {
                name: PROPERTY_BIG_MOVEMENT_CUTOFF,
                value: self.cutoff(),
                default: DEFAULT_BIG_MOVEMENT_CUTOFF,
                tooltip: BIG_MOVEMENT_CUTOFF_TOOLTIP,
            },
        ]
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            PROPERTY_EMA_WEIGHT => self.set_weight(value),
            PROPERTY_BIG_MOVEMENT_CUTOFF => self.set_cutoff(value),
            _ => return Err(Error::UnknownProperty(name.to_string())),
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Tablet Reconstructor Configuration

# Inverse EMA parameters
reconstructor:
  # Weight of the device's own smoothing (0.0 - 1.0], 1 == no effect
  ema_weight: 0.5
  # Moves longer than this pass through untouched, -1 == disabled
  big_movement_cutoff: -1.0

# Filter run on the stream: reconstructor, exponential:<alpha>, none
pipeline:
  filter: "reconstructor"
"#;
