//! Gaze data records
//!
//! Strongly typed sample and fixation records plus the JSON envelopes used
//! to persist them. Field access is compile-time checked throughout; there
//! is no dynamic column lookup anywhere in the pipeline.

pub mod dataset;
pub mod fixation;
pub mod missing;
pub mod sample;

pub use dataset::{Dataset, FixationSet};
pub use fixation::Fixation;
pub use sample::{ClassifiedSample, Sample};
