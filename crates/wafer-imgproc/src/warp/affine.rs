use std::f32::consts::PI;

use wafer_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{bilinear_interpolation, grid::meshgrid_from_fn};
use crate::parallel;

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // follow OpenCV: a singular matrix inverts to zeros
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use wafer_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((50.0, 50.0), 0.0, 1.0);
/// assert_eq!(m, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Returns a 2x3 matrix translating by `(tx, ty)` pixels.
pub fn get_translation_matrix2d(tx: f32, ty: f32) -> [f32; 6] {
    [1.0, 0.0, tx, 0.0, 1.0, ty]
}

/// Composes two 2x3 affine matrices into one.
///
/// The result maps a point through `first` and then through `second`.
pub fn compose_affine(first: &[f32; 6], second: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (
        second[0], second[1], second[2], second[3], second[4], second[5],
    );
    let (g, h, i, j, k, l) = (first[0], first[1], first[2], first[3], first[4], first[5]);

    [
        a * g + b * j,
        a * h + b * k,
        a * i + b * l + c,
        d * g + e * j,
        d * h + e * k,
        d * i + e * l + f,
    ]
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Pixels are resampled bilinearly with a constant border: source positions
/// within one pixel of any edge blend towards `border_value`, and positions
/// further out are set to it. Every destination pixel is written, so the
/// previous content of `dst` never leaks through.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix mapping `src` to `dst`.
/// * `border_value` - The constant color for uncovered pixels.
///
/// # Errors
///
/// Returns [`ImageError::EmptyImage`] when either image has no pixels.
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    border_value: [T; C],
) -> Result<(), ImageError> {
    if src.is_empty() || dst.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        Ok::<_, ImageError>(transform_point(x as f32, y as f32, &m_inv))
    })?;

    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);
    let border = border_value.map(Into::<f32>::into);

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        if x > -1.0f32 && x < src_cols && y > -1.0f32 && y < src_rows {
            let pixel = bilinear_interpolation(src, x, y, &border);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(out, &val)| *out = T::from_f32(val));
        } else {
            dst_pixel.copy_from_slice(&border_value);
        }
    });

    Ok(())
}
