//! Fixation records
//!
//! The aggregated output of the detection pipeline. A fixation is derived
//! from a finalized, fully classified sample sequence and is immutable once
//! produced.

use serde::{Deserialize, Serialize};

/// A fixation episode: a maximal run of non-saccadic samples bounded by
/// saccades and/or trial boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    /// Trial the fixation belongs to (never spans more than one)
    pub trial: u64,
    /// Time of the first member sample
    pub start: f64,
    /// Time of the last member sample
    pub end: f64,
    /// Mean horizontal position of the member samples
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub x: f64,
    /// Mean vertical position of the member samples
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub y: f64,
    /// Sample standard deviation of x; NaN for single-sample fixations
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub sd_x: f64,
    /// Sample standard deviation of y; NaN for single-sample fixations
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub sd_y: f64,
    /// Signed horizontal velocity of largest magnitude within the fixation
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub peak_vx: f64,
    /// Signed vertical velocity of largest magnitude within the fixation
    #[serde(with = "crate::data::missing::nan_as_null")]
    pub peak_vy: f64,
    /// Duration, `end - start`, in the caller's time unit
    pub dur: f64,
}
