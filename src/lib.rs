//! # Gazekit
//!
//! A velocity-threshold gaze event detection engine that classifies a
//! chronologically ordered stream of 2-D gaze samples into alternating
//! saccade and fixation episodes, and aggregates each fixation into a
//! compact descriptive record.
//!
//! ## Overview
//!
//! Raw gaze samples (time, trial, x, y) flow through a single-pass batch
//! pipeline: optional coordinate smoothing, central-difference velocity
//! estimation, a robust median-based velocity threshold, elliptical saccade
//! classification with optional gap closing, and finally aggregation of the
//! non-saccadic stretches into fixation records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gazekit::{FixationDetector, Sample};
//!
//! // Samples must be pre-sorted by time within each trial.
//! let samples: Vec<Sample> = load_samples();
//!
//! let detector = FixationDetector::with_defaults();
//! let fixations = detector.detect(&samples).expect("detection failed");
//!
//! for f in &fixations {
//!     println!("trial {} fixation at ({:.1}, {:.1}) for {:.0} ms", f.trial, f.x, f.y, f.dur);
//! }
//! # fn load_samples() -> Vec<gazekit::Sample> { vec![] }
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`data`]: Sample, fixation, and dataset records
//! - [`signal`]: Coordinate smoothing and velocity estimation
//! - [`detection`]: Adaptive threshold, saccade classification, fixation aggregation
//! - [`pipeline`]: The [`FixationDetector`] orchestrating the five stages
//! - [`report`]: Per-trial descriptive statistics over fixation sets
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐   ┌───────────┐   ┌────────────┐   ┌────────────┐   ┌─────────────┐
//! │ Smoothing │──▶│ Velocity  │──▶│ Adaptive   │──▶│ Saccade    │──▶│ Fixation    │
//! │ (optional)│   │ estimation│   │ threshold  │   │ classifier │   │ aggregation │
//! └───────────┘   └───────────┘   └────────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! Each stage fully materializes its output before the next begins; the
//! pipeline holds no state across invocations, so callers may run one
//! detection per recording concurrently without coordination.

pub mod data;
pub mod signal;
pub mod detection;
pub mod pipeline;
pub mod report;
pub mod app;

// Re-export commonly used types
pub use data::fixation::Fixation;
pub use data::sample::{ClassifiedSample, Sample};
pub use pipeline::detector::{DetectorConfig, FixationDetector, ThresholdScope};

/// Result type alias for gazekit
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gazekit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    Input(String),

    #[error(
        "No fixations detected: every sample was classified as saccade. \
         This usually indicates a detection threshold that is too aggressive \
         (lambda too small for the noise level of the recording)."
    )]
    NoFixations,

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
