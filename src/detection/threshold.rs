//! Adaptive velocity threshold
//!
//! Derives a per-axis detection radius from the velocity distribution using
//! a median-based dispersion estimate. Ordinary variance is avoided because
//! saccade-contaminated velocity distributions have heavy tails; the median
//! estimator stays put under outliers such as blinks and track loss.

use tracing::warn;

/// Default threshold sensitivity multiplier.
///
/// Larger values detect fewer, larger saccades; smaller values are more
/// sensitive and produce more false positives on noisy signals.
pub const DEFAULT_LAMBDA: f64 = 15.0;

/// Per-axis detection radii of the velocity ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityThreshold {
    pub radius_x: f64,
    pub radius_y: f64,
}

impl VelocityThreshold {
    /// Compute detection radii over the given velocity slice.
    ///
    /// `radius = msd * lambda` per axis, where `msd` is the robust
    /// dispersion of that axis's velocities. The scope of the slice
    /// (whole dataset or single trial) is the caller's decision.
    pub fn compute(vx: &[f64], vy: &[f64], lambda: f64) -> Self {
        let radius_x = robust_dispersion(vx) * lambda;
        let radius_y = robust_dispersion(vy) * lambda;

        let threshold = Self { radius_x, radius_y };
        if threshold.is_degenerate() {
            // Zero or NaN dispersion on an axis. Not an error: the ellipse
            // test classifies every affected sample as non-saccade, which
            // the caller may see as a suspiciously fixation-only result.
            warn!(
                radius_x,
                radius_y, "degenerate velocity threshold; all samples will classify as non-saccade"
            );
        }
        threshold
    }

    /// True if either axis has a zero, negative, or non-finite radius.
    pub fn is_degenerate(&self) -> bool {
        !(self.radius_x.is_finite() && self.radius_x > 0.0)
            || !(self.radius_y.is_finite() && self.radius_y > 0.0)
    }
}

/// Robust dispersion estimate: `sqrt(median(v^2) - median(v)^2)`.
///
/// NaN values (track loss) are excluded from both medians. Returns NaN for
/// sequences with no usable values or when the difference under the square
/// root is negative.
pub fn robust_dispersion(values: &[f64]) -> f64 {
    let med = median_ignoring_nan(values.iter().copied());
    let med_sq = median_ignoring_nan(values.iter().map(|v| v * v));
    (med_sq - med * med).sqrt()
}

/// Median of the non-NaN values; NaN if none remain.
fn median_ignoring_nan(values: impl Iterator<Item = f64>) -> f64 {
    let mut usable: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if usable.is_empty() {
        return f64::NAN;
    }

    usable.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = usable.len();
    if n % 2 == 1 {
        usable[n / 2]
    } else {
        (usable[n / 2 - 1] + usable[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median_ignoring_nan([3.0, 1.0, 2.0].into_iter()), 2.0);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median_ignoring_nan([4.0, 1.0, 3.0, 2.0].into_iter()), 2.5);
    }

    #[test]
    fn test_median_excludes_nan() {
        let values = [1.0, f64::NAN, 3.0, f64::NAN, 2.0];
        assert_eq!(median_ignoring_nan(values.into_iter()), 2.0);
    }

    #[test]
    fn test_median_all_nan() {
        assert!(median_ignoring_nan([f64::NAN, f64::NAN].into_iter()).is_nan());
    }

    #[test]
    fn test_dispersion_known_value() {
        // median = 0, median of squares = 1
        assert_eq!(robust_dispersion(&[-1.0, 0.0, 1.0]), 1.0);
    }

    #[test]
    fn test_dispersion_constant_is_zero() {
        assert_eq!(robust_dispersion(&[2.0, 2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_dispersion_resists_outliers() {
        // A single huge outlier (a blink artifact) barely moves the estimate.
        let calm = robust_dispersion(&[-1.0, 0.0, 1.0, 0.5, -0.5]);
        let contaminated = robust_dispersion(&[-1.0, 0.0, 1.0, 0.5, 5000.0]);
        assert!(contaminated < calm * 3.0);
    }

    #[test]
    fn test_dispersion_empty_is_nan() {
        assert!(robust_dispersion(&[]).is_nan());
    }

    #[test]
    fn test_compute_scales_with_lambda() {
        let vx = [-1.0, 0.0, 1.0];
        let vy = [-2.0, 0.0, 2.0];
        let t = VelocityThreshold::compute(&vx, &vy, 10.0);
        assert_eq!(t.radius_x, 10.0);
        assert_eq!(t.radius_y, 20.0);
        assert!(!t.is_degenerate());
    }

    #[test]
    fn test_degenerate_on_constant_axis() {
        let vx = [1.0, 1.0, 1.0];
        let vy = [-1.0, 0.0, 1.0];
        let t = VelocityThreshold::compute(&vx, &vy, 15.0);
        assert_eq!(t.radius_x, 0.0);
        assert!(t.is_degenerate());
    }
}
