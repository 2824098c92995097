//! Thumbnail parameters
//!
//! Output format selection by file extension, thumbnail modes and the
//! explicit crop rectangle.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl OutputFormat {
    /// Choose the output format from an extension or file name.
    ///
    /// When the input contains a `.` past its first character only the text
    /// after the last `.` is looked at. `bmp`, `png` and `gif` (any case)
    /// select their own format, everything else is JPEG.
    pub fn from_extension(ext: &str) -> Self {
        let ext = match ext.rfind('.') {
            Some(idx) if idx > 0 => &ext[idx + 1..],
            _ => ext,
        };
        match ext.to_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "png" => Self::Png,
            "gif" => Self::Gif,
            _ => Self::Jpeg,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a thumbnail maps the source onto the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailMode {
    /// Exact width, height follows the source aspect ("W")
    FixedWidth,
    /// Exact height, width follows the source aspect ("H")
    FixedHeight,
    /// Fill the box, padding with white ("HW")
    Pad,
    /// Fill the box, cropping the overflow ("Cut")
    Cut,
    /// Scale the whole source to exactly the box
    Stretch,
}

impl ThumbnailMode {
    /// Parse a mode code. Unknown codes stretch.
    pub fn parse(code: &str) -> Self {
        match code {
            "W" => Self::FixedWidth,
            "H" => Self::FixedHeight,
            "HW" => Self::Pad,
            "Cut" => Self::Cut,
            _ => Self::Stretch,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::FixedWidth => "W",
            Self::FixedHeight => "H",
            Self::Pad => "HW",
            Self::Cut => "Cut",
            Self::Stretch => "stretch",
        }
    }
}

impl FromStr for ThumbnailMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Explicit crop rectangle in source pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
