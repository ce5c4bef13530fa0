#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Affine matrices and warps applied to a source image.
pub mod compositor;

/// Generator configuration loaded from JSON.
pub mod config;

/// Error types for the generator.
pub mod error;

/// Random transform parameters and their bounds.
pub mod params;

/// Generation records and the results handed back to callers.
pub mod record;

/// Record persistence collaborators.
pub mod store;

/// The wafer image transformer.
pub mod transformer;

pub use crate::compositor::WarpMode;
pub use crate::config::GeneratorConfig;
pub use crate::error::WaferError;
pub use crate::params::TransformParams;
pub use crate::record::{Generation, GenerationRecord, LabeledImage, RecordId};
pub use crate::store::{JsonLinesRecordStore, MemoryRecordStore, RecordStore, StoreError};
pub use crate::transformer::{to_bitmap, WaferImageTransformer};
