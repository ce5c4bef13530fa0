use std::path::Path;

use wafer_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method reads any format supported by the image crate and converts it
/// to three channels, the same way a color-mode decode would.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] when the path does not exist.
/// * [`IoError::ImageDecodeError`] when the file cannot be decoded.
/// * [`IoError::EmptyImage`] when the decoded image has no pixels.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    if size.is_empty() {
        return Err(IoError::EmptyImage(file_path.to_path_buf()));
    }

    log::debug!("decoded {} as {:?} {}", file_path.display(), img.color(), size);

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}
