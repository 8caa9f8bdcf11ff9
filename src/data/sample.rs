//! Gaze sample records
//!
//! Defines the raw input sample and its classified in-pipeline counterpart.

use serde::{Deserialize, Serialize};

/// A single raw gaze sample.
///
/// Samples belong to exactly one trial and must be ordered by `time`
/// ascending within each trial. The time unit is the caller's (typically
/// milliseconds); all derived durations use the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp, monotonic within a trial
    pub time: f64,
    /// Trial identifier; a change of trial always terminates a fixation
    pub trial: u64,
    /// Horizontal gaze position; NaN marks track loss
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub x: f64,
    /// Vertical gaze position; NaN marks track loss
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub y: f64,
}

impl Sample {
    pub fn new(time: f64, trial: u64, x: f64, y: f64) -> Self {
        Self { time, trial, x, y }
    }
}

/// A sample annotated by the detection pipeline.
///
/// Carries the (possibly smoothed) coordinates, the estimated velocity
/// components, and the saccade classification. The original samples are
/// never mutated; the pipeline works on a sequence of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSample {
    pub time: f64,
    pub trial: u64,
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub x: f64,
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub y: f64,
    /// Estimated horizontal velocity (position units per sample interval)
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub vx: f64,
    /// Estimated vertical velocity (position units per sample interval)
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub vy: f64,
    /// True if the sample's velocity falls outside the threshold ellipse
    pub is_saccade: bool,
}
