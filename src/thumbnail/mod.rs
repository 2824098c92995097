//! Thumbnail module
//!
//! Turns encoded image bytes into smaller encoded image bytes:
//! - Fit within a maximum box, never enlarging (`make_thumbnail`)
//! - Fixed width, fixed height, pad, crop or stretch (`make_thumbnail_with_mode`)
//! - Explicit crop rectangle scaled to a box (`make_cropped_thumbnail`)
//!
//! The output format follows the file extension: `bmp`, `png` and `gif`
//! keep their format, anything else is written as JPEG.
//!
//! # Example
//!
//! ```no_run
//! use bizkit::thumbnail::{make_thumbnail_with_mode, ThumbnailMode};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let thumb = make_thumbnail_with_mode(&bytes, "jpg", 300, 300, ThumbnailMode::Cut).unwrap();
//! ```

pub mod encoder;
pub mod error;
pub mod geometry;
pub mod params;
pub mod processor;

pub use encoder::{encode_image, EncodedImage, EncoderFactory, EncoderQuality, ImageEncoder};
pub use error::ImageError;
pub use geometry::{fit_within, plan, Dimensions, SourceWindow, ThumbnailPlan};
pub use params::{CropRect, OutputFormat, ThumbnailMode};
pub use processor::{
    decode_image, make_cropped_thumbnail, make_thumbnail, make_thumbnail_with_mode, resize_image,
};
