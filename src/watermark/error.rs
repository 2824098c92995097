//! Watermark error types.

use std::fmt;

use crate::thumbnail::ImageError;

/// Errors that can occur during watermark processing.
#[derive(Debug)]
pub enum WatermarkError {
    /// Failed to read a watermark asset from disk
    IoError(String),

    /// Failed to decode the base image or the overlay
    DecodeError(String),

    /// Failed to load the font used for text overlays
    FontError(String),

    /// Failed to encode the watermarked image
    EncodeError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "Failed to read watermark asset: {}", msg),
            Self::DecodeError(msg) => write!(f, "Failed to decode watermark image: {}", msg),
            Self::FontError(msg) => write!(f, "Failed to load watermark font: {}", msg),
            Self::EncodeError(msg) => write!(f, "Failed to encode watermarked image: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl From<ImageError> for WatermarkError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::DecodeFailed { message } => Self::DecodeError(message),
            other => Self::EncodeError(other.to_string()),
        }
    }
}
