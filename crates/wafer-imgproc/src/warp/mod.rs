//! Geometric image transformations using affine warps.
//!
//! - Affine transformations (rotation, translation, scaling)
//! - Rotation matrix generation
//! - Affine transform inversion and composition
//!
//! # Examples
//!
//! Rotating an image by 45 degrees about its center:
//!
//! ```
//! use wafer_image::Image;
//! use wafer_imgproc::warp::{get_rotation_matrix2d, warp_affine};
//!
//! let src = Image::<u8, 3>::from_size_val([64, 48].into(), 255).unwrap();
//! let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0).unwrap();
//!
//! let m = get_rotation_matrix2d(src.size().center(), 45.0, 1.0);
//! warp_affine(&src, &mut dst, &m, [0; 3]).unwrap();
//!
//! assert_eq!(dst.size(), src.size());
//! ```

mod affine;

pub use affine::{
    compose_affine, get_rotation_matrix2d, get_translation_matrix2d, invert_affine_transform,
    transform_point, warp_affine,
};
