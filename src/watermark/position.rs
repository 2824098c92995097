//! Anchor placement for watermark overlays.
//!
//! Offsets are proportional to the container: 1% from the near edge, the
//! middle, or 1% from the far edge. All arithmetic is done in `f32`.
//!
//! Image overlays halve their size with integer division and truncate the
//! final offset to whole pixels. Text overlays keep the measured float size
//! and a float offset.
//!
//! # Example
//!
//! ```
//! use bizkit::watermark::position::{image_anchor_offset, Anchor, PlacementPosition};
//!
//! let pos = image_anchor_offset(Anchor::BottomRight, (800, 600), (100, 50));
//! assert_eq!(pos, Some(PlacementPosition::new(692, 544)));
//! ```

use std::str::FromStr;

/// Where an overlay is anchored on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// No overlay is drawn
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Map a legacy location code: 1-9 run left to right, top to bottom.
    /// Zero and unknown codes mean no overlay.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::TopLeft,
            2 => Self::TopCenter,
            3 => Self::TopRight,
            4 => Self::MidLeft,
            5 => Self::Center,
            6 => Self::MidRight,
            7 => Self::BottomLeft,
            8 => Self::BottomCenter,
            9 => Self::BottomRight,
            _ => Self::None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::TopLeft => 1,
            Self::TopCenter => 2,
            Self::TopRight => 3,
            Self::MidLeft => 4,
            Self::Center => 5,
            Self::MidRight => 6,
            Self::BottomLeft => 7,
            Self::BottomCenter => 8,
            Self::BottomRight => 9,
        }
    }

    fn alignment(&self) -> Option<(Align, Align)> {
        let pair = match self {
            Self::None => return None,
            Self::TopLeft => (Align::Near, Align::Near),
            Self::TopCenter => (Align::Middle, Align::Near),
            Self::TopRight => (Align::Far, Align::Near),
            Self::MidLeft => (Align::Near, Align::Middle),
            Self::Center => (Align::Middle, Align::Middle),
            Self::MidRight => (Align::Far, Align::Middle),
            Self::BottomLeft => (Align::Near, Align::Far),
            Self::BottomCenter => (Align::Middle, Align::Far),
            Self::BottomRight => (Align::Far, Align::Far),
        };
        Some(pair)
    }
}

impl FromStr for Anchor {
    type Err = String;

    /// Accepts a numeric code or a kebab-case name such as `bottom-right`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i32>() {
            return Ok(Self::from_code(code));
        }
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "top-left" => Ok(Self::TopLeft),
            "top-center" => Ok(Self::TopCenter),
            "top-right" => Ok(Self::TopRight),
            "mid-left" => Ok(Self::MidLeft),
            "center" => Ok(Self::Center),
            "mid-right" => Ok(Self::MidRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-center" => Ok(Self::BottomCenter),
            "bottom-right" => Ok(Self::BottomRight),
            other => Err(format!("unknown anchor: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Near,
    Middle,
    Far,
}

/// A single position where an overlay should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn axis_offset(align: Align, container: f32, overlay: f32, half_overlay: f32) -> f32 {
    match align {
        Align::Near => container * 0.01,
        Align::Middle => container * 0.50 - half_overlay,
        Align::Far => container * 0.99 - overlay,
    }
}

/// Offset of an image overlay of size `overlay` inside `container`.
///
/// Returns `None` for [`Anchor::None`]. Offsets may be negative when the
/// overlay is larger than the container.
pub fn image_anchor_offset(
    anchor: Anchor,
    container: (u32, u32),
    overlay: (u32, u32),
) -> Option<PlacementPosition> {
    let (align_x, align_y) = anchor.alignment()?;
    let x = axis_offset(
        align_x,
        container.0 as f32,
        overlay.0 as f32,
        (overlay.0 / 2) as f32,
    );
    let y = axis_offset(
        align_y,
        container.1 as f32,
        overlay.1 as f32,
        (overlay.1 / 2) as f32,
    );
    Some(PlacementPosition::new(x as i32, y as i32))
}

/// Offset of a text block of measured size `overlay` inside `container`.
pub fn text_anchor_offset(
    anchor: Anchor,
    container: (u32, u32),
    overlay: (f32, f32),
) -> Option<(f32, f32)> {
    let (align_x, align_y) = anchor.alignment()?;
    let x = axis_offset(align_x, container.0 as f32, overlay.0, overlay.0 / 2.0);
    let y = axis_offset(align_y, container.1 as f32, overlay.1, overlay.1 / 2.0);
    Some((x, y))
}
