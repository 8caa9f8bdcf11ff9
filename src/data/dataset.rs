//! Dataset persistence
//!
//! JSON envelopes for sample collections and detection results, with
//! metadata describing provenance and shape.

use crate::data::fixation::Fixation;
use crate::data::sample::Sample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current dataset format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Metadata attached to a persisted sample collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Unique dataset ID
    pub id: Uuid,
    /// Dataset name
    pub name: String,
    /// Free-form provenance note (recording device, session, ...)
    pub source: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Total sample count
    pub sample_count: usize,
    /// Number of distinct trials
    pub trial_count: usize,
    /// Version of the dataset format
    pub format_version: String,
}

impl DatasetMetadata {
    fn new(name: String, source: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            source,
            created_at: Utc::now(),
            sample_count: 0,
            trial_count: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A persisted collection of gaze samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset from a sample collection, filling in the counts.
    pub fn from_samples(name: String, source: Option<String>, samples: Vec<Sample>) -> Self {
        let mut metadata = DatasetMetadata::new(name, source);
        metadata.sample_count = samples.len();
        metadata.trial_count = count_trials(samples.iter().map(|s| s.trial));
        Self { metadata, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&content)?;
        Ok(dataset)
    }
}

/// Metadata attached to a persisted detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixationSetMetadata {
    /// Unique result ID
    pub id: Uuid,
    /// ID of the dataset the fixations were detected in, if known
    pub dataset_id: Option<Uuid>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Total fixation count
    pub fixation_count: usize,
    /// Number of distinct trials with at least one fixation
    pub trial_count: usize,
    /// Version of the result format
    pub format_version: String,
}

/// A persisted detection result: the ordered fixation sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixationSet {
    pub metadata: FixationSetMetadata,
    pub fixations: Vec<Fixation>,
}

impl FixationSet {
    /// Wrap a detector output, filling in the counts.
    pub fn from_fixations(dataset_id: Option<Uuid>, fixations: Vec<Fixation>) -> Self {
        let metadata = FixationSetMetadata {
            id: Uuid::new_v4(),
            dataset_id,
            created_at: Utc::now(),
            fixation_count: fixations.len(),
            trial_count: count_trials(fixations.iter().map(|f| f.trial)),
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        };
        Self { metadata, fixations }
    }

    pub fn len(&self) -> usize {
        self.fixations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixations.is_empty()
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set: Self = serde_json::from_str(&content)?;
        Ok(set)
    }
}

/// Count distinct trial runs in chronological order.
///
/// Counts transitions rather than unique values: trials are contiguous in a
/// well-formed dataset, so this equals the number of distinct trials there.
fn count_trials(trials: impl Iterator<Item = u64>) -> usize {
    let mut count = 0;
    let mut last: Option<u64> = None;
    for trial in trials {
        if last != Some(trial) {
            count += 1;
            last = Some(trial);
        }
    }
    count
}
