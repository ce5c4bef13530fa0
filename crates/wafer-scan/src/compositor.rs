//! Builds the affine matrices for a [`TransformParams`] and warps images with them.
//!
//! The default [`WarpMode::TwoPass`] warps once with the rotation+scale matrix
//! and once more with the translation matrix, filling uncovered pixels with
//! [`BORDER_VALUE`] in both passes. [`WarpMode::Fused`] composes both matrices
//! and warps a single time.

use serde::{Deserialize, Serialize};
use wafer_image::{Image, ImageError, ImageSize};
use wafer_imgproc::warp::{
    compose_affine, get_rotation_matrix2d, get_translation_matrix2d, warp_affine,
};

use crate::params::TransformParams;

/// Fill value for pixels not covered by the transformed content.
pub const BORDER_VALUE: u8 = 0;

/// How the rotation+scale and translation matrices are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpMode {
    /// Two sequential warps, each with its own border fill.
    #[default]
    TwoPass,
    /// One warp with the composed matrix.
    Fused,
}

/// Matrix rotating by `angle_degrees` and scaling by `scale` about the center of `src`.
///
/// The result is shifted so the center of `src` lands on the center of `canvas`.
pub fn rotation_scale_matrix(
    src: ImageSize,
    canvas: ImageSize,
    params: &TransformParams,
) -> [f32; 6] {
    let center = src.center();
    let mut m = get_rotation_matrix2d(center, params.angle_degrees as f32, params.scale as f32);

    // re-center on the output canvas
    let canvas_center = canvas.center();
    m[2] += canvas_center.0 - center.0;
    m[5] += canvas_center.1 - center.1;

    m
}

/// Matrix offsetting by `(translate_x, translate_y)`.
pub fn translation_matrix(params: &TransformParams) -> [f32; 6] {
    get_translation_matrix2d(params.translate_x as f32, params.translate_y as f32)
}

/// Warp `src` with the given parameters onto a canvas of the same size.
///
/// # Errors
///
/// Returns [`ImageError::EmptyImage`] when `src` has no pixels.
pub fn apply<const C: usize>(
    mode: WarpMode,
    src: &Image<u8, C>,
    params: &TransformParams,
) -> Result<Image<u8, C>, ImageError> {
    match mode {
        WarpMode::TwoPass => warp_two_pass(src, params),
        WarpMode::Fused => warp_fused(src, params),
    }
}

/// Rotation+scale warp followed by a separate translation warp.
pub fn warp_two_pass<const C: usize>(
    src: &Image<u8, C>,
    params: &TransformParams,
) -> Result<Image<u8, C>, ImageError> {
    let size = src.size();
    let rotation = rotation_scale_matrix(size, size, params);
    let translation = translation_matrix(params);
    log::debug!("rotation matrix: {rotation:?}, translation matrix: {translation:?}");

    let mut rotated = Image::from_size_val(size, BORDER_VALUE)?;
    warp_affine(src, &mut rotated, &rotation, [BORDER_VALUE; C])?;

    let mut result = Image::from_size_val(size, BORDER_VALUE)?;
    warp_affine(&rotated, &mut result, &translation, [BORDER_VALUE; C])?;

    Ok(result)
}

/// Single warp with the rotation+scale and translation matrices composed.
pub fn warp_fused<const C: usize>(
    src: &Image<u8, C>,
    params: &TransformParams,
) -> Result<Image<u8, C>, ImageError> {
    let size = src.size();
    let m = compose_affine(
        &rotation_scale_matrix(size, size, params),
        &translation_matrix(params),
    );
    log::debug!("fused matrix: {m:?}");

    let mut result = Image::from_size_val(size, BORDER_VALUE)?;
    warp_affine(src, &mut result, &m, [BORDER_VALUE; C])?;

    Ok(result)
}
