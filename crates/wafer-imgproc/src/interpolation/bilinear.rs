use wafer_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation with a constant border.
///
/// Each of the four neighbours of `(u, v)` that falls outside the image
/// contributes `border` instead of a pixel, on every side of the image. The
/// result is fully `border` once `u <= -1`, `u >= cols`, `v <= -1` or
/// `v >= rows`.
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The channel values outside the image.
///
/// # Returns
///
/// The interpolated channel values as f32.
pub fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: &[f32; C],
) -> [f32; C] {
    let (rows, cols) = (image.rows() as i64, image.cols() as i64);

    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let (iu0, iv0) = (u0 as i64, v0 as i64);
    let (iu1, iv1) = (iu0 + 1, iv0 + 1);

    let data = image.as_slice();
    let neighbour = |iu: i64, iv: i64| {
        if iu < 0 || iv < 0 || iu >= cols || iv >= rows {
            return None;
        }
        let base = (iv as usize * cols as usize + iu as usize) * C;
        data.get(base..base + C)
    };

    let taps = [
        (neighbour(iu0, iv0), frac_uu * frac_vv),
        (neighbour(iu1, iv0), frac_u * frac_vv),
        (neighbour(iu0, iv1), frac_uu * frac_v),
        (neighbour(iu1, iv1), frac_u * frac_v),
    ];

    let mut pixel = [0.0; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        *out = taps
            .iter()
            .filter(|(_, w)| *w != 0.0)
            .map(|(px, w)| {
                let val = px.map_or(border[k], |px| px[k].into());
                val * w
            })
            .sum();
    }

    pixel
}

#[cfg(test)]
mod tests {
    use wafer_image::{Image, ImageError};

    use super::bilinear_interpolation;

    #[test]
    fn bilinear_midpoint() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 2].into(), vec![0, 100, 100, 200])?;
        let pixel = bilinear_interpolation(&image, 0.5, 0.5, &[0.0]);
        approx::assert_relative_eq!(pixel[0], 100.0);
        Ok(())
    }

    #[test]
    fn bilinear_integer_coordinates_are_exact() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::new([2, 1].into(), vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(
            bilinear_interpolation(&image, 1.0, 0.0, &[0.0; 2]),
            [3.0, 4.0]
        );
        Ok(())
    }

    #[test]
    fn bilinear_blends_border_on_both_sides() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 1].into(), vec![200, 200, 200])?;

        // a quarter pixel past the left and the right edge
        let left = bilinear_interpolation(&image, -0.25, 0.0, &[0.0]);
        let right = bilinear_interpolation(&image, 2.25, 0.0, &[0.0]);
        approx::assert_relative_eq!(left[0], 150.0);
        approx::assert_relative_eq!(right[0], 150.0);

        // a quarter pixel past the top and the bottom edge
        let top = bilinear_interpolation(&image, 1.0, -0.25, &[40.0]);
        let bottom = bilinear_interpolation(&image, 1.0, 0.25, &[40.0]);
        approx::assert_relative_eq!(top[0], 160.0);
        approx::assert_relative_eq!(bottom[0], 160.0);
        Ok(())
    }
}
