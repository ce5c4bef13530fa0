#![deny(missing_docs)]
//! Image types for generating and exporting wafer scan images

/// image representation for the wafer scan pipeline.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Export of images into caller-visible bitmaps.
pub mod bitmap;

pub use crate::bitmap::{Bitmap, PixelFormat};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
