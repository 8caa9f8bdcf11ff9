//! Signal conditioning
//!
//! Coordinate smoothing and velocity estimation over ordered sample runs.
//! Both stages operate on plain coordinate sequences; trial structure only
//! matters later, at aggregation.

pub mod smoothing;
pub mod velocity;

pub use smoothing::moving_average;
pub use velocity::central_difference;
