//! Reporting over fixation sets
//!
//! Descriptive statistics consumed by humans: per-trial breakdowns and
//! dataset-level aggregates, rendered as plain text. Read-only over the
//! detector's output.

pub mod summary;

pub use summary::{render, summarize, Stat, Summary, TrialSummary};
