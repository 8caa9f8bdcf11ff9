//! Fixation detector
//!
//! Runs the five pipeline stages over a working copy of the caller's
//! samples: smoothing, velocity estimation, threshold computation, saccade
//! classification, and fixation aggregation. The caller's samples are never
//! mutated.

use crate::data::fixation::Fixation;
use crate::data::sample::{ClassifiedSample, Sample};
use crate::detection::aggregation::aggregate;
use crate::detection::classifier::{classify, close_gaps};
use crate::detection::threshold::{VelocityThreshold, DEFAULT_LAMBDA};
use crate::signal::smoothing::{moving_average, DEFAULT_WINDOW};
use crate::signal::velocity::central_difference;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scope over which the adaptive threshold is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdScope {
    /// One threshold over the entire sample slice passed to the detector.
    #[default]
    Pooled,
    /// An independent threshold per trial.
    PerTrial,
}

impl std::fmt::Display for ThresholdScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pooled => write!(f, "pooled"),
            Self::PerTrial => write!(f, "per-trial"),
        }
    }
}

/// Detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Threshold sensitivity multiplier; must be positive and finite
    pub lambda: f64,
    /// Apply moving-average smoothing to coordinates before velocity estimation
    pub smooth_coordinates: bool,
    /// Close short gaps between adjacent saccade runs
    pub smooth_saccades: bool,
    /// Coordinate smoothing window (samples); must be odd
    pub smoothing_window: usize,
    /// Threshold scope: pooled over the input or independent per trial
    pub threshold_scope: ThresholdScope,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            smooth_coordinates: true,
            smooth_saccades: true,
            smoothing_window: DEFAULT_WINDOW,
            threshold_scope: ThresholdScope::Pooled,
        }
    }
}

impl DetectorConfig {
    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda <= 0.0 {
            return Err(Error::Config(format!(
                "lambda must be positive and finite, got {}",
                self.lambda
            )));
        }
        if self.smoothing_window % 2 == 0 {
            return Err(Error::Config(format!(
                "smoothing_window must be odd, got {}",
                self.smoothing_window
            )));
        }
        Ok(())
    }
}

/// The detection pipeline.
pub struct FixationDetector {
    config: DetectorConfig,
}

impl FixationDetector {
    /// Create a detector with the given parameters.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Create a detector with default parameters.
    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full pipeline: classify every sample, then aggregate the
    /// non-saccadic stretches into fixations.
    pub fn detect(&self, samples: &[Sample]) -> Result<Vec<Fixation>> {
        let classified = self.classify_samples(samples)?;
        aggregate(&classified)
    }

    /// Run the pipeline up to classification, returning the annotated
    /// working copy (smoothed coordinates, velocities, saccade flags).
    ///
    /// Useful for inspecting intermediate state; [`detect`](Self::detect)
    /// is this plus aggregation.
    pub fn classify_samples(&self, samples: &[Sample]) -> Result<Vec<ClassifiedSample>> {
        self.config.validate()?;
        validate_samples(samples)?;

        let mut xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
        let mut ys: Vec<f64> = samples.iter().map(|s| s.y).collect();

        if self.config.smooth_coordinates {
            xs = moving_average(&xs, self.config.smoothing_window);
            ys = moving_average(&ys, self.config.smoothing_window);
        }

        let vx = central_difference(&xs);
        let vy = central_difference(&ys);

        let mut flags = match self.config.threshold_scope {
            ThresholdScope::Pooled => {
                let threshold = VelocityThreshold::compute(&vx, &vy, self.config.lambda);
                debug!(?threshold, "pooled velocity threshold");
                classify(&vx, &vy, &threshold)
            }
            ThresholdScope::PerTrial => {
                let mut flags = Vec::with_capacity(samples.len());
                for (start, end) in trial_runs(samples) {
                    let threshold = VelocityThreshold::compute(
                        &vx[start..end],
                        &vy[start..end],
                        self.config.lambda,
                    );
                    debug!(trial = samples[start].trial, ?threshold, "per-trial velocity threshold");
                    flags.extend(classify(&vx[start..end], &vy[start..end], &threshold));
                }
                flags
            }
        };

        if self.config.smooth_saccades {
            flags = close_gaps(&flags);
        }

        let classified = samples
            .iter()
            .enumerate()
            .map(|(i, s)| ClassifiedSample {
                time: s.time,
                trial: s.trial,
                x: xs[i],
                y: ys[i],
                vx: vx[i],
                vy: vy[i],
                is_saccade: flags[i],
            })
            .collect();
        Ok(classified)
    }
}

/// Validate the input sample sequence.
///
/// The core does not sort: samples must arrive ordered by time (ascending,
/// duplicates tolerated) within each trial, with finite timestamps. Time
/// may restart at a trial boundary.
pub fn validate_samples(samples: &[Sample]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::Input("empty sample set".to_string()));
    }
    for (i, s) in samples.iter().enumerate() {
        if !s.time.is_finite() {
            return Err(Error::Input(format!(
                "non-finite timestamp {} at index {}",
                s.time, i
            )));
        }
        if i > 0 {
            let prev = &samples[i - 1];
            if s.trial == prev.trial && s.time < prev.time {
                return Err(Error::Input(format!(
                    "samples not ordered by time within trial {} at index {} ({} < {})",
                    s.trial, i, s.time, prev.time
                )));
            }
        }
    }
    Ok(())
}

/// Contiguous `[start, end)` index runs of equal trial identifier.
fn trial_runs(samples: &[Sample]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..samples.len() {
        if samples[i].trial != samples[i - 1].trial {
            runs.push((start, i));
            start = i;
        }
    }
    if start < samples.len() {
        runs.push((start, samples.len()));
    }
    runs
}
