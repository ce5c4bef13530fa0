use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wafer_image::Image;

use crate::params::TransformParams;

/// Metadata describing one generated image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Sequence label of the generation, e.g. `scan0003`.
    pub original_name: String,
    /// File name the image is saved under, `<uuid>.png`.
    pub saved_name: String,
    /// When the image was generated.
    pub generated_time: DateTime<Utc>,
}

/// Identifier assigned to a record by a [`crate::RecordStore`].
///
/// Opaque to the generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transformed image together with its label and naming.
#[derive(Clone, Debug)]
pub struct LabeledImage<const C: usize> {
    /// The transformed image, same size as the source.
    pub image: Image<u8, C>,
    /// Parameters the image was generated with.
    pub params: TransformParams,
    /// Label, file name and timestamp of the generation.
    pub record: GenerationRecord,
}

/// A generated image that has been written to disk.
#[derive(Clone, Debug)]
pub struct Generation<const C: usize> {
    /// The transformed image, same size as the source.
    pub image: Image<u8, C>,
    /// Parameters the image was generated with.
    pub params: TransformParams,
    /// Label, file name and timestamp of the generation.
    pub record: GenerationRecord,
    /// Full path of the saved PNG.
    pub saved_path: PathBuf,
    /// Identifier from the record store, once inserted.
    pub record_id: Option<RecordId>,
}

impl<const C: usize> Generation<C> {
    pub(crate) fn saved(labeled: LabeledImage<C>, saved_path: PathBuf) -> Self {
        Self {
            image: labeled.image,
            params: labeled.params,
            record: labeled.record,
            saved_path,
            record_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn record_json_roundtrip() -> Result<(), serde_json::Error> {
        let record = GenerationRecord {
            original_name: "scan0042".to_string(),
            saved_name: "4f1c0f0e-8a0e-4d43-9a53-2c4f7f1d2b11.png".to_string(),
            generated_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_string(&record)?;
        assert!(json.contains("\"original_name\":\"scan0042\""));
        assert!(json.contains("2024-03-01T12:30:00Z"));

        let back: GenerationRecord = serde_json::from_str(&json)?;
        assert_eq!(back, record);
        Ok(())
    }

    #[test]
    fn record_id_is_transparent() -> Result<(), serde_json::Error> {
        let id = RecordId::new("65f1a2b3c4d5e6f7a8b9c0d1");
        assert_eq!(serde_json::to_string(&id)?, "\"65f1a2b3c4d5e6f7a8b9c0d1\"");
        assert_eq!(id.to_string(), id.as_str());
        Ok(())
    }
}
