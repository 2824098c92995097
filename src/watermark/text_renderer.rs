//! Text overlay rendering.
//!
//! Fonts are loaded from a TrueType/OpenType file at a fixed pixel size.
//! Text is measured with advances and kerning, then drawn glyph by glyph
//! directly onto the target image at a floating-point origin.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::compositor::blend_pixels;
use super::WatermarkError;

/// Padding added to measured text on each axis, in pixels.
const MEASURE_PADDING: f32 = 2.0;

/// Font file plus pixel size for text overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub path: PathBuf,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>, size_px: f32) -> Self {
        Self {
            path: path.into(),
            size_px,
        }
    }
}

/// A loaded font at a fixed pixel size.
pub struct WatermarkFont {
    font: FontVec,
    scale: PxScale,
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkFont")
            .field("scale", &self.scale)
            .finish()
    }
}

impl WatermarkFont {
    pub fn load(spec: &FontSpec) -> Result<Self, WatermarkError> {
        Self::from_file(&spec.path, spec.size_px)
    }

    pub fn from_file(path: &Path, size_px: f32) -> Result<Self, WatermarkError> {
        let data = std::fs::read(path)
            .map_err(|e| WatermarkError::FontError(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, size_px)
    }

    pub fn from_bytes(data: Vec<u8>, size_px: f32) -> Result<Self, WatermarkError> {
        if !(size_px.is_finite() && size_px > 0.0) {
            return Err(WatermarkError::FontError(format!(
                "font size must be positive, got {}",
                size_px
            )));
        }
        let font = FontVec::try_from_vec(data)
            .map_err(|e| WatermarkError::FontError(e.to_string()))?;
        Ok(Self {
            font,
            scale: PxScale::from(size_px),
        })
    }
}

/// RGB colour used for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Measured size of `text` as (width, height) in pixels, padding included.
pub fn measure_text(font: &WatermarkFont, text: &str) -> (f32, f32) {
    let scaled_font = font.font.as_scaled(font.scale);

    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    (
        width.ceil() + MEASURE_PADDING,
        scaled_font.height().ceil() + MEASURE_PADDING,
    )
}

/// Draw `text` onto `target` with its top-left corner at `origin`.
///
/// Glyph coverage is alpha blended over the existing pixels; anything
/// outside the target is clipped.
pub fn draw_text(
    target: &mut RgbaImage,
    font: &WatermarkFont,
    text: &str,
    origin: (f32, f32),
    color: Color,
) {
    let scaled_font = font.font.as_scaled(font.scale);
    let (width, height) = (target.width() as i32, target.height() as i32);

    let baseline_y = origin.1 + scaled_font.ascent();
    let mut cursor_x = origin.0;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph =
            glyph_id.with_scale_and_position(font.scale, ab_glyph::point(cursor_x, baseline_y));

        if let Some(outlined) = font.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < width && y < height {
                    let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
                    let pixel = Rgba([color.r, color.g, color.b, alpha]);
                    let existing = *target.get_pixel(x as u32, y as u32);
                    target.put_pixel(x as u32, y as u32, blend_pixels(existing, pixel, 1.0));
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

/// Locate a font installed on the test machine, if any.
#[cfg(test)]
pub(crate) fn find_system_font() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}
