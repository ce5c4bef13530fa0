#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use wafer_image as image;

#[doc(inline)]
pub use wafer_imgproc as imgproc;

#[doc(inline)]
pub use wafer_io as io;

#[doc(inline)]
pub use wafer_scan as scan;
