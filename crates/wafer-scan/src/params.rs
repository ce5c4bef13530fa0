use std::ops::{Range, RangeInclusive};

use rand::Rng;
use serde::{Deserialize, Serialize};
use wafer_image::ImageSize;

use crate::error::WaferError;

/// Range of the random scale factor.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.8..=1.0;

/// Range of the random rotation angle in degrees.
pub const ANGLE_RANGE: Range<f64> = 0.0..360.0;

/// Parameters of one randomized affine transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    /// Scale factor applied about the image center.
    pub scale: f64,
    /// Rotation about the image center, in degrees.
    pub angle_degrees: f64,
    /// Horizontal offset in pixels, applied after rotation and scale.
    pub translate_x: i32,
    /// Vertical offset in pixels, applied after rotation and scale.
    pub translate_y: i32,
}

/// Largest translation that keeps scaled content inside the canvas.
///
/// Returns `(floor(W * (1 - scale) / 2), floor(H * (1 - scale) / 2))`, or zero
/// on an axis when `scale >= 1`.
///
/// # Example
///
/// ```
/// use wafer_scan::params::max_translation;
///
/// assert_eq!(max_translation([200, 100].into(), 0.9), (9, 4));
/// assert_eq!(max_translation([200, 100].into(), 1.0), (0, 0));
/// ```
pub fn max_translation(size: ImageSize, scale: f64) -> (u32, u32) {
    let overhang = (1.0 - scale).max(0.0);
    let max_x = (size.width as f64 * overhang / 2.0).floor();
    let max_y = (size.height as f64 * overhang / 2.0).floor();
    (max_x as u32, max_y as u32)
}

// a zero bound pins the axis; drawing from -0..=0 is never attempted
fn sample_offset<R: Rng + ?Sized>(rng: &mut R, max: u32) -> i32 {
    if max == 0 {
        return 0;
    }
    let max = max as i32;
    rng.random_range(-max..=max)
}

impl TransformParams {
    /// The no-op transform.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            angle_degrees: 0.0,
            translate_x: 0,
            translate_y: 0,
        }
    }

    /// Draw a fresh set of parameters for an image of the given size.
    ///
    /// Scale and angle are independent. The translation range on each axis
    /// is bounded by [`max_translation`] for the drawn scale.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, size: ImageSize) -> Self {
        let scale = rng.random_range(SCALE_RANGE);
        let angle_degrees = rng.random_range(ANGLE_RANGE);

        let (max_tx, max_ty) = max_translation(size, scale);

        Self {
            scale,
            angle_degrees,
            translate_x: sample_offset(rng, max_tx),
            translate_y: sample_offset(rng, max_ty),
        }
    }

    /// Check the parameters against an image of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`WaferError::InvalidParams`] when the scale is not positive,
    /// the angle is not finite, or a translation exceeds its bound.
    pub fn validate(&self, size: ImageSize) -> Result<(), WaferError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(WaferError::InvalidParams(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }

        if !self.angle_degrees.is_finite() {
            return Err(WaferError::InvalidParams(format!(
                "angle must be finite, got {}",
                self.angle_degrees
            )));
        }

        let (max_tx, max_ty) = max_translation(size, self.scale);
        if self.translate_x.unsigned_abs() > max_tx || self.translate_y.unsigned_abs() > max_ty {
            return Err(WaferError::InvalidParams(format!(
                "translation ({}, {}) exceeds ({max_tx}, {max_ty}) for scale {}",
                self.translate_x, self.translate_y, self.scale
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for TransformParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "scale={:.4}, angle={:.2}, translate_x={}, translate_y={}",
            self.scale, self.angle_degrees, self.translate_x, self.translate_y
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn sampled_params_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = ImageSize {
            width: 640,
            height: 480,
        };

        for _ in 0..1000 {
            let params = TransformParams::sample(&mut rng, size);
            assert!(SCALE_RANGE.contains(&params.scale));
            assert!(ANGLE_RANGE.contains(&params.angle_degrees));

            let (max_tx, max_ty) = max_translation(size, params.scale);
            assert!(params.translate_x.unsigned_abs() <= max_tx);
            assert!(params.translate_y.unsigned_abs() <= max_ty);
            assert!(params.validate(size).is_ok());
        }
    }

    #[test]
    fn translation_bound_shrinks_with_scale() {
        let size = ImageSize {
            width: 1000,
            height: 500,
        };
        let (x_low, y_low) = max_translation(size, 0.8);
        let (x_mid, y_mid) = max_translation(size, 0.9);
        assert!(x_low > x_mid && y_low > y_mid);
        assert_eq!(max_translation(size, 1.0), (0, 0));
    }

    #[test]
    fn zero_bound_forces_zero_translation() {
        let mut rng = StdRng::seed_from_u64(3);
        // a 4x4 canvas never overhangs by a full pixel
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        for _ in 0..200 {
            let params = TransformParams::sample(&mut rng, size);
            assert_eq!((params.translate_x, params.translate_y), (0, 0));
        }
        assert_eq!(sample_offset(&mut rng, 0), 0);
    }

    #[test]
    fn validate_rejects_bad_params() {
        let size = ImageSize {
            width: 100,
            height: 100,
        };

        let mut params = TransformParams::identity();
        assert!(params.validate(size).is_ok());

        params.scale = 0.0;
        assert!(matches!(
            params.validate(size),
            Err(WaferError::InvalidParams(_))
        ));

        params.scale = 1.0;
        params.translate_x = 1;
        assert!(matches!(
            params.validate(size),
            Err(WaferError::InvalidParams(_))
        ));

        params.translate_x = 0;
        params.angle_degrees = f64::NAN;
        assert!(params.validate(size).is_err());
    }
}
