//! Constants used throughout the crate

/// Host-facing name of the weight property
pub const PROPERTY_EMA_WEIGHT: &str = "EMA Weight";

/// Host-facing name of the cutoff property
pub const PROPERTY_BIG_MOVEMENT_CUTOFF: &str = "Big Movement Cutoff";

/// Default EMA weight
pub const DEFAULT_EMA_WEIGHT: f64 = 0.5;

/// Default cutoff (disabled)
pub const DEFAULT_BIG_MOVEMENT_CUTOFF: f64 = -1.0;

/// Sentinel cutoff value meaning "never skip reversal"
pub const CUTOFF_DISABLED: f64 = -1.0;

/// EMA weight bounds
pub const EMA_WEIGHT_MIN: f64 = 0.0;
pub const EMA_WEIGHT_MAX: f64 = 1.0;

/// Weight the inverse formula divides by when the stored weight is 0.
pub const MIN_EFFECTIVE_WEIGHT: f64 = 1e-3;

/// Default forward smoothing alpha for the exponential smoother
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Tooltip shown next to the weight property
pub const EMA_WEIGHT_TOOLTIP: &str = "Default: 0.5\n\n\
    Defines the weight of the latest sample against previous ones [Range: 0.0 - 1.0]\n  \
    Lower == More hardware smoothing removed\n  \
    1 == No effect";

/// Tooltip shown next to the cutoff property
pub const BIG_MOVEMENT_CUTOFF_TOOLTIP: &str = "Default: -1\n\n\
    Any move larger than this will not be smoothed, use with relative output mode.\n  \
    -1 == No effect";
