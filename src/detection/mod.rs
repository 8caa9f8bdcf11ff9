//! Saccade detection and fixation aggregation
//!
//! The algorithmic core: a robust, outlier-resistant velocity threshold,
//! the elliptical saccade test, and the segmentation of classified samples
//! into fixation records.

pub mod aggregation;
pub mod classifier;
pub mod threshold;

pub use aggregation::aggregate;
pub use classifier::{classify, close_gaps};
pub use threshold::{robust_dispersion, VelocityThreshold};
