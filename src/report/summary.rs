//! Per-trial descriptive statistics
//!
//! Computes mean/sd aggregates over a fixation collection: trial duration,
//! fixation counts, fixation duration, dispersion, and peak velocity.
//! Verbosity is an explicit parameter of the rendering call; this module
//! holds no ambient state.

use crate::data::fixation::Fixation;
use crate::{Error, Result};

/// A mean/sd pair. NaN inputs are excluded; sd is NaN when fewer than two
/// values remain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub mean: f64,
    pub sd: f64,
}

impl Stat {
    fn over(values: &[f64]) -> Self {
        let usable: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        Self {
            mean: mean(&usable),
            sd: sample_sd(&usable),
        }
    }
}

/// Aggregates for one trial.
#[derive(Debug, Clone)]
pub struct TrialSummary {
    pub trial: u64,
    /// Extent of the trial as seen through its fixations:
    /// last fixation end minus first fixation start
    pub duration: f64,
    pub fixation_count: usize,
    pub fixation_duration: Stat,
    /// Mean within-fixation dispersion (sd_x / sd_y, NaN excluded)
    pub dispersion_x: f64,
    pub dispersion_y: f64,
    /// Largest absolute peak velocity over the trial's fixations
    pub peak_velocity_x: f64,
    pub peak_velocity_y: f64,
}

/// Dataset-level summary: per-trial breakdowns plus aggregates across
/// trials and across all fixations.
#[derive(Debug, Clone)]
pub struct Summary {
    pub trials: Vec<TrialSummary>,
    pub fixation_total: usize,
    /// Across trials
    pub trial_duration: Stat,
    pub fixations_per_trial: Stat,
    /// Across all fixations
    pub fixation_duration: Stat,
    pub dispersion_x: Stat,
    pub dispersion_y: Stat,
    pub peak_velocity_x: Stat,
    pub peak_velocity_y: Stat,
}

/// Compute the summary over a fixation collection.
///
/// Fixations must be in their original chronological order; trials are
/// taken as contiguous runs. Fails on an empty collection, since there is
/// nothing to describe.
pub fn summarize(fixations: &[Fixation]) -> Result<Summary> {
    if fixations.is_empty() {
        return Err(Error::Report("empty fixation collection".to_string()));
    }

    let mut trials = Vec::new();
    let mut start = 0;
    for i in 1..=fixations.len() {
        if i == fixations.len() || fixations[i].trial != fixations[start].trial {
            trials.push(summarize_trial(&fixations[start..i]));
            start = i;
        }
    }

    let durations: Vec<f64> = fixations.iter().map(|f| f.dur).collect();
    let sd_x: Vec<f64> = fixations.iter().map(|f| f.sd_x).collect();
    let sd_y: Vec<f64> = fixations.iter().map(|f| f.sd_y).collect();
    let peak_x: Vec<f64> = fixations.iter().map(|f| f.peak_vx.abs()).collect();
    let peak_y: Vec<f64> = fixations.iter().map(|f| f.peak_vy.abs()).collect();

    let trial_durations: Vec<f64> = trials.iter().map(|t| t.duration).collect();
    let counts: Vec<f64> = trials.iter().map(|t| t.fixation_count as f64).collect();

    Ok(Summary {
        fixation_total: fixations.len(),
        trial_duration: Stat::over(&trial_durations),
        fixations_per_trial: Stat::over(&counts),
        fixation_duration: Stat::over(&durations),
        dispersion_x: Stat::over(&sd_x),
        dispersion_y: Stat::over(&sd_y),
        peak_velocity_x: Stat::over(&peak_x),
        peak_velocity_y: Stat::over(&peak_y),
        trials,
    })
}

fn summarize_trial(fixations: &[Fixation]) -> TrialSummary {
    let durations: Vec<f64> = fixations.iter().map(|f| f.dur).collect();
    let sd_x: Vec<f64> = fixations
        .iter()
        .map(|f| f.sd_x)
        .filter(|v| !v.is_nan())
        .collect();
    let sd_y: Vec<f64> = fixations
        .iter()
        .map(|f| f.sd_y)
        .filter(|v| !v.is_nan())
        .collect();

    TrialSummary {
        trial: fixations[0].trial,
        duration: fixations[fixations.len() - 1].end - fixations[0].start,
        fixation_count: fixations.len(),
        fixation_duration: Stat::over(&durations),
        dispersion_x: mean(&sd_x),
        dispersion_y: mean(&sd_y),
        peak_velocity_x: peak_magnitude(fixations.iter().map(|f| f.peak_vx)),
        peak_velocity_y: peak_magnitude(fixations.iter().map(|f| f.peak_vy)),
    }
}

/// Render the summary as an aligned text table.
///
/// `per_trial` adds a per-trial breakdown below the aggregate table;
/// `precision` controls decimal places. Both are explicit parameters so
/// callers decide verbosity per invocation.
pub fn render(summary: &Summary, per_trial: bool, precision: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Summary over {} trial(s), {} fixation(s)\n\n",
        summary.trials.len(),
        summary.fixation_total
    ));

    out.push_str(&format!("  {:<22} {:>12} {:>12}\n", "metric", "mean", "sd"));
    let rows = [
        ("trial duration", summary.trial_duration),
        ("fixations per trial", summary.fixations_per_trial),
        ("fixation duration", summary.fixation_duration),
        ("dispersion x", summary.dispersion_x),
        ("dispersion y", summary.dispersion_y),
        ("peak velocity x", summary.peak_velocity_x),
        ("peak velocity y", summary.peak_velocity_y),
    ];
    for (label, stat) in rows {
        out.push_str(&format!(
            "  {:<22} {:>12} {:>12}\n",
            label,
            fmt_value(stat.mean, precision),
            fmt_value(stat.sd, precision)
        ));
    }

    if per_trial {
        out.push('\n');
        out.push_str(&format!(
            "  {:<8} {:>10} {:>10} {:>12} {:>12} {:>12}\n",
            "trial", "fixations", "duration", "mean fixdur", "disp x/y", "peak vx/vy"
        ));
        for t in &summary.trials {
            out.push_str(&format!(
                "  {:<8} {:>10} {:>10} {:>12} {:>12} {:>12}\n",
                t.trial,
                t.fixation_count,
                fmt_value(t.duration, precision),
                fmt_value(t.fixation_duration.mean, precision),
                format!(
                    "{}/{}",
                    fmt_value(t.dispersion_x, precision),
                    fmt_value(t.dispersion_y, precision)
                ),
                format!(
                    "{}/{}",
                    fmt_value(t.peak_velocity_x, precision),
                    fmt_value(t.peak_velocity_y, precision)
                ),
            ));
        }
    }

    out
}

fn fmt_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.precision$}")
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_sd(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

fn peak_magnitude(values: impl Iterator<Item = f64>) -> f64 {
    values
        .map(f64::abs)
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixation(trial: u64, start: f64, end: f64, sd: f64, peak_vx: f64) -> Fixation {
        Fixation {
            trial,
            start,
            end,
            x: 0.0,
            y: 0.0,
            sd_x: sd,
            sd_y: sd,
            peak_vx,
            peak_vy: -peak_vx,
            dur: end - start,
        }
    }

    #[test]
    fn test_empty_collection_is_error() {
        assert!(matches!(summarize(&[]), Err(Error::Report(_))));
    }

    #[test]
    fn test_trial_grouping_and_counts() {
        let fixations = vec![
            fixation(1, 0.0, 10.0, 1.0, 0.5),
            fixation(1, 20.0, 40.0, 2.0, -0.8),
            fixation(2, 0.0, 30.0, 3.0, 0.2),
        ];
        let summary = summarize(&fixations).unwrap();
        assert_eq!(summary.trials.len(), 2);
        assert_eq!(summary.fixation_total, 3);
        assert_eq!(summary.trials[0].fixation_count, 2);
        assert_eq!(summary.trials[0].duration, 40.0);
        assert_eq!(summary.trials[1].fixation_count, 1);
        assert_eq!(summary.trials[1].duration, 30.0);
    }

    #[test]
    fn test_aggregate_statistics() {
        let fixations = vec![
            fixation(1, 0.0, 10.0, 1.0, 0.5),
            fixation(1, 20.0, 40.0, 2.0, -0.8),
        ];
        let summary = summarize(&fixations).unwrap();
        // Durations 10 and 20.
        assert!((summary.fixation_duration.mean - 15.0).abs() < 1e-12);
        assert!((summary.fixation_duration.sd - 7.0710678).abs() < 1e-6);
        // Peak velocity stats use absolute magnitudes.
        assert!((summary.peak_velocity_x.mean - 0.65).abs() < 1e-12);
        // Single trial: sd across trials is undefined.
        assert!(summary.trial_duration.sd.is_nan());
        assert_eq!(summary.trials[0].peak_velocity_x, 0.8);
    }

    #[test]
    fn test_nan_dispersion_excluded() {
        let fixations = vec![
            fixation(1, 0.0, 10.0, 2.0, 0.5),
            fixation(1, 20.0, 20.0, f64::NAN, 0.1), // single-sample fixation
            fixation(1, 30.0, 40.0, 4.0, 0.3),
        ];
        let summary = summarize(&fixations).unwrap();
        assert!((summary.dispersion_x.mean - 3.0).abs() < 1e-12);
        assert!((summary.trials[0].dispersion_x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_render_aggregate_table() {
        let fixations = vec![
            fixation(1, 0.0, 10.0, 1.0, 0.5),
            fixation(2, 0.0, 30.0, 3.0, 0.2),
        ];
        let summary = summarize(&fixations).unwrap();
        let table = render(&summary, false, 2);
        assert!(table.contains("Summary over 2 trial(s), 2 fixation(s)"));
        assert!(table.contains("trial duration"));
        assert!(table.contains("peak velocity y"));
        assert!(!table.contains("mean fixdur"));
    }

    #[test]
    fn test_render_per_trial_breakdown() {
        let fixations = vec![
            fixation(1, 0.0, 10.0, 1.0, 0.5),
            fixation(2, 0.0, 30.0, 3.0, 0.2),
        ];
        let summary = summarize(&fixations).unwrap();
        let table = render(&summary, true, 2);
        assert!(table.contains("mean fixdur"));
        assert!(table.lines().count() > 12);
    }

    #[test]
    fn test_render_nan_as_dash() {
        let fixations = vec![fixation(1, 0.0, 10.0, f64::NAN, 0.5)];
        let summary = summarize(&fixations).unwrap();
        let table = render(&summary, false, 2);
        // Dispersion has no usable values in a single NaN-sd fixation.
        assert!(table.contains('-'));
    }
}
