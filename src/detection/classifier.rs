//! Saccade classification
//!
//! Tests each sample's velocity vector against the threshold ellipse, with
//! optional temporal closing of short gaps between adjacent saccade runs.

use crate::detection::threshold::VelocityThreshold;

/// Classify each sample against the velocity ellipse.
///
/// A sample is saccadic iff `(vx/rx)^2 + (vy/ry)^2 > 1`, strictly
/// greater. An indeterminate test value (NaN from track loss, or a
/// non-finite ratio from a degenerate radius) classifies as non-saccade
/// rather than propagating.
pub fn classify(vx: &[f64], vy: &[f64], threshold: &VelocityThreshold) -> Vec<bool> {
    debug_assert_eq!(vx.len(), vy.len());
    vx.iter()
        .zip(vy.iter())
        .map(|(&vx, &vy)| {
            let t = (vx / threshold.radius_x).powi(2) + (vy / threshold.radius_y).powi(2);
            t.is_finite() && t > 1.0
        })
        .collect()
}

/// Close short gaps in the saccade indicator.
///
/// Applies a 3-sample centered moving average to the indicator (as 0/1)
/// and rounds back to boolean. Runs shorter than the window are merged or
/// removed: a lone non-saccade sample between two saccades joins them, a
/// lone saccade sample disappears. The first and last flags keep their
/// original values, as in coordinate smoothing.
pub fn close_gaps(flags: &[bool]) -> Vec<bool> {
    let n = flags.len();
    if n < 3 {
        return flags.to_vec();
    }

    let mut result = flags.to_vec();
    for i in 1..n - 1 {
        let count = flags[i - 1] as u8 + flags[i] as u8 + flags[i + 1] as u8;
        result[i] = count >= 2;
    }
    result
}
