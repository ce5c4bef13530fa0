use std::path::{Path, PathBuf};

use wafer_image::ImageError;
use wafer_io::IoError;

use crate::record::GenerationRecord;
use crate::store::StoreError;

/// An error type for the wafer scan generator.
#[derive(thiserror::Error, Debug)]
pub enum WaferError {
    /// The source image is missing, corrupt or has no pixels.
    #[error("Could not load the image from {}: {reason}", display_path(.path.as_deref()))]
    ImageLoad {
        /// Path of the source file, `None` for in-memory images.
        path: Option<PathBuf>,
        /// What went wrong while loading.
        reason: String,
    },

    /// The image has a channel depth with no bitmap representation.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    /// Caller-supplied transform parameters are out of range.
    #[error("Invalid transform parameters: {0}")]
    InvalidParams(String),

    /// Writing the generated image failed.
    #[error("Failed to save the image to {}. {source}", .path.display())]
    Save {
        /// Destination of the failed write.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// Inserting the generation record failed. The image file is left on disk.
    #[error("Failed to persist the record for {}. {source}", .saved_path.display())]
    Persistence {
        /// The record that could not be stored.
        record: GenerationRecord,
        /// Where the generated image was written.
        saved_path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },

    /// The label counter cannot advance past `u32::MAX`.
    #[error("No labels left after {0}")]
    LabelsExhausted(String),

    /// The configuration could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from the image container.
    #[error(transparent)]
    Image(ImageError),
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "memory".to_string(), |p| p.display().to_string())
}

impl From<ImageError> for WaferError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::UnsupportedChannels(c) => WaferError::UnsupportedChannels(c),
            ImageError::EmptyImage => WaferError::ImageLoad {
                path: None,
                reason: e.to_string(),
            },
            e => WaferError::Image(e),
        }
    }
}
