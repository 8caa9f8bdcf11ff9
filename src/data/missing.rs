//! Missing-value tolerant serde adapters
//!
//! Gaze recordings contain track-loss stretches (blinks, dropped frames)
//! encoded as NaN coordinates. JSON has no NaN literal, so fields that may
//! legitimately be missing round-trip as `null`.

/// Serialize a possibly-NaN `f64` as `null`, and read `null` back as NaN.
///
/// Apply with `#[serde(with = "crate::data::missing::nan_as_null")]`.
pub mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<f64>::deserialize(deserializer)?;
        Ok(opt.unwrap_or(f64::NAN))
    }
}
