//! Pixel interpolation for image transformations.
//!
//! Bilinear interpolation between the four adjacent pixels, with neighbours
//! outside the image taking a constant border value.

mod bilinear;

/// Grid generation and coordinate mapping utilities.
pub mod grid;

pub use bilinear::bilinear_interpolation;
