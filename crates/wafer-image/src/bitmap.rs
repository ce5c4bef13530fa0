use crate::{Image, ImageError, ImageSize};

/// Pixel layouts a bitmap consumer can display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit grayscale, one byte per pixel.
    Gray8,
    /// 8-bit RGB, three bytes per pixel.
    Rgb24,
    /// 8-bit RGB with alpha, four bytes per pixel.
    Rgba32,
}

impl PixelFormat {
    /// Resolve the pixel format for a channel count.
    ///
    /// # Errors
    ///
    /// Only 1, 3 and 4 channels have a bitmap layout.
    pub fn from_channels(channels: usize) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(PixelFormat::Gray8),
            3 => Ok(PixelFormat::Rgb24),
            4 => Ok(PixelFormat::Rgba32),
            c => Err(ImageError::UnsupportedChannels(c)),
        }
    }

    /// Number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }
}

/// A packed 8-bit bitmap ready to be handed to a display surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    /// Size of the bitmap in pixels.
    pub size: ImageSize,
    /// Layout of each pixel.
    pub format: PixelFormat,
    /// Number of bytes per row.
    pub stride: usize,
    /// Packed pixel data, `stride * height` bytes.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Pack an 8-bit image into a bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedChannels`] when `C` is not 1, 3 or 4.
    ///
    /// # Example
    ///
    /// ```
    /// use wafer_image::{Bitmap, Image, PixelFormat};
    ///
    /// let image = Image::<u8, 3>::from_size_val([4, 2].into(), 7).unwrap();
    /// let bitmap = Bitmap::from_image(&image).unwrap();
    ///
    /// assert_eq!(bitmap.format, PixelFormat::Rgb24);
    /// assert_eq!(bitmap.stride, 12);
    /// assert_eq!(bitmap.data.len(), 24);
    /// ```
    pub fn from_image<const C: usize>(image: &Image<u8, C>) -> Result<Self, ImageError> {
        let format = PixelFormat::from_channels(C)?;
        let stride = image.width() * format.bytes_per_pixel();

        Ok(Self {
            size: image.size(),
            format,
            stride,
            data: image.as_slice().to_vec(),
        })
    }
}
