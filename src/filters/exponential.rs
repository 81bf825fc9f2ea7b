use super::PositionFilter;
use crate::sample::Sample;

/// Forward EMA, the smoothing tablets apply in firmware
pub struct ExponentialSmoother {
    alpha: f64,
    last: Option<Sample>,
}

impl ExponentialSmoother {
    /// Create a new smoother
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl PositionFilter for ExponentialSmoother {
    fn apply(&mut self, sample: Sample) -> Sample {
        let smoothed = match self.last {
            Some(last) => sample * self.alpha + last * (1.0 - self.alpha),
            None => sample,
        };
        self.last = Some(smoothed);
        smoothed
    }

    fn name(&self) -> &str {
        "ExponentialSmoother"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_smoother() {
        let mut filter = ExponentialSmoother::new(0.5);

        // First value passes through
        assert_eq!(filter.apply(Sample::new(10.0, 20.0)), Sample::new(10.0, 20.0));

        // Second value is smoothed
        assert_eq!(filter.apply(Sample::new(20.0, 30.0)), Sample::new(15.0, 25.0));
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialSmoother::new(0.9);
        filter1.apply(Sample::new(10.0, 20.0));
        let s = filter1.apply(Sample::new(20.0, 30.0));
        assert!((s.x - 19.0).abs() < 0.001); // 0.9 * 20 + 0.1 * 10

        // Low alpha = more smoothing
        let mut filter2 = ExponentialSmoother::new(0.1);
        filter2.apply(Sample::new(10.0, 20.0));
        let s = filter2.apply(Sample::new(20.0, 30.0));
        assert!((s.x - 11.0).abs() < 0.001); // 0.1 * 20 + 0.9 * 10
    }

    #[test]
    #[should_panic(expected = "Alpha must be in (0, 1]")]
    fn test_zero_alpha_rejected() {
        let _ = ExponentialSmoother::new(0.0);
    }
}
