//! Thumbnail geometry
//!
//! Pure size and source-window arithmetic. Nothing here touches pixels, so
//! every mode can be checked without decoding an image.
//!
//! The pad and crop modes reproduce the legacy arithmetic literally: the
//! source window is computed with integer math and may start at a negative
//! offset or reach past the source edges. Those parts are rendered as
//! background.

use super::error::ImageError;
use super::params::ThumbnailMode;
use crate::constants::MAX_CANVAS_PIXELS;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn fits_within(&self, max: Dimensions) -> bool {
        self.width <= max.width && self.height <= max.height
    }
}

/// Region of the source drawn into the whole target box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl SourceWindow {
    fn whole(src: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: src.width as i64,
            height: src.height as i64,
        }
    }
}

/// Target size plus the source window to scale into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailPlan {
    pub target: Dimensions,
    pub source: SourceWindow,
}

/// Shrink `width`×`height` to fit inside the maxima, keeping aspect ratio.
///
/// A maximum of zero or less means "no limit" on that axis. Images that
/// already fit are returned unchanged; images are never enlarged.
pub fn fit_within(width: u32, height: u32, max_width: i32, max_height: i32) -> Dimensions {
    let max_width = if max_width <= 0 {
        width
    } else {
        max_width as u32
    };
    let max_height = if max_height <= 0 {
        height
    } else {
        max_height as u32
    };

    let original = Dimensions::new(width, height);
    if original.fits_within(Dimensions::new(max_width, max_height)) || width == 0 || height == 0
    {
        return original;
    }

    let (w, h) = (width as f64, height as f64);
    let (mw, mh) = (max_width as f64, max_height as f64);
    let factor = if w / h > mw / mh { w / mw } else { h / mh };

    Dimensions::new(
        (w / factor).round_ties_even() as u32,
        (h / factor).round_ties_even() as u32,
    )
}

/// Plan a thumbnail of `width`×`height` from a source of size `src`.
///
/// Fixed-width and fixed-height modes only read the dimension they fix.
pub fn plan(
    src: Dimensions,
    width: u32,
    height: u32,
    mode: ThumbnailMode,
) -> Result<ThumbnailPlan, ImageError> {
    if src.width == 0 || src.height == 0 {
        return Err(ImageError::invalid_dimensions(
            src.width as i64,
            src.height as i64,
            "source image has a zero dimension",
        ));
    }

    let (ow, oh) = (src.width as i64, src.height as i64);
    let (tw, th) = (width as i64, height as i64);

    let plan = match mode {
        ThumbnailMode::FixedWidth => {
            let to_height = scaled(oh, tw, ow)?;
            ThumbnailPlan {
                target: checked_target(tw, to_height)?,
                source: SourceWindow::whole(src),
            }
        }
        ThumbnailMode::FixedHeight => {
            let to_width = scaled(ow, th, oh)?;
            ThumbnailPlan {
                target: checked_target(to_width, th)?,
                source: SourceWindow::whole(src),
            }
        }
        ThumbnailMode::Pad => {
            let target = checked_target(tw, th)?;
            let source = if wider_than_target(src, target) {
                full_width_window(ow, oh, tw, th)?
            } else {
                full_height_window(ow, oh, tw, th)?
            };
            ThumbnailPlan { target, source }
        }
        ThumbnailMode::Cut => {
            let target = checked_target(tw, th)?;
            let source = if wider_than_target(src, target) {
                full_height_window(ow, oh, tw, th)?
            } else {
                full_width_window(ow, oh, tw, th)?
            };
            ThumbnailPlan { target, source }
        }
        ThumbnailMode::Stretch => ThumbnailPlan {
            target: checked_target(tw, th)?,
            source: SourceWindow::whole(src),
        },
    };

    tracing::debug!(
        mode = mode.code(),
        src_width = src.width,
        src_height = src.height,
        target_width = plan.target.width,
        target_height = plan.target.height,
        window_x = plan.source.x,
        window_y = plan.source.y,
        window_width = plan.source.width,
        window_height = plan.source.height,
        "Planned thumbnail"
    );

    Ok(plan)
}

fn checked_target(width: i64, height: i64) -> Result<Dimensions, ImageError> {
    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(ImageError::invalid_dimensions(
            width,
            height,
            "thumbnail dimensions must be positive",
        ));
    }
    if width.saturating_mul(height) > MAX_CANVAS_PIXELS {
        return Err(ImageError::invalid_dimensions(
            width,
            height,
            format!("thumbnail exceeds {} pixels", MAX_CANVAS_PIXELS),
        ));
    }
    Ok(Dimensions::new(width as u32, height as u32))
}

// `a * b / c` in integer math, truncating toward zero.
fn scaled(a: i64, b: i64, c: i64) -> Result<i64, ImageError> {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(c))
        .ok_or_else(|| ImageError::invalid_dimensions(a, b, "dimension arithmetic overflowed"))
}

fn wider_than_target(src: Dimensions, target: Dimensions) -> bool {
    (src.width as f64 / src.height as f64) > (target.width as f64 / target.height as f64)
}

// Keeps the full source width; the height follows the target aspect.
fn full_width_window(ow: i64, oh: i64, tw: i64, th: i64) -> Result<SourceWindow, ImageError> {
    let height = scaled(ow, th, tw)?;
    Ok(SourceWindow {
        x: 0,
        y: (oh - height) / 2,
        width: ow,
        height,
    })
}

// Keeps the full source height; the width follows the target aspect.
fn full_height_window(ow: i64, oh: i64, tw: i64, th: i64) -> Result<SourceWindow, ImageError> {
    let width = scaled(oh, tw, th)?;
    Ok(SourceWindow {
        x: (ow - width) / 2,
        y: 0,
        width,
        height: oh,
    })
}
