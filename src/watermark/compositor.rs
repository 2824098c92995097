//! Overlay compositing.
//!
//! Alpha blends an overlay image onto a base image at a placement position,
//! with an extra opacity multiplier applied to the overlay's alpha channel.
//!
//! # Example
//!
//! ```
//! use bizkit::watermark::compositor::{apply_layer, opacity_for_level, WatermarkLayer};
//! use bizkit::watermark::position::PlacementPosition;
//! use image::{Rgba, RgbaImage};
//!
//! let mut base = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
//! let layer = WatermarkLayer {
//!     image: RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])),
//!     position: PlacementPosition::new(5, 5),
//!     opacity: opacity_for_level(5),
//! };
//! apply_layer(&mut base, &layer);
//! ```

use super::position::PlacementPosition;
use image::{Rgba, RgbaImage};

/// Opaque pure green is treated as a transparent key colour in overlays.
pub const CHROMA_KEY: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// An overlay to be composited onto an image.
#[derive(Clone)]
pub struct WatermarkLayer {
    /// The overlay image (RGBA).
    pub image: RgbaImage,
    /// Position of the overlay's top-left corner on the base image.
    pub position: PlacementPosition,
    /// Opacity multiplier (0.0 to 1.0) applied to the overlay alpha.
    pub opacity: f32,
}

impl std::fmt::Debug for WatermarkLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkLayer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("position", &self.position)
            .field("opacity", &self.opacity)
            .finish()
    }
}

/// Opacity multiplier for a transparency level.
///
/// Levels 1 through 10 map to 0.1 through 1.0 (10 is fully opaque). Any
/// other level yields 0.5.
pub fn opacity_for_level(level: i32) -> f32 {
    if (1..=10).contains(&level) {
        level as f32 / 10.0
    } else {
        0.5
    }
}

/// Make every [`CHROMA_KEY`] pixel fully transparent.
pub fn remove_chroma_key(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        if *pixel == CHROMA_KEY {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Blend a layer onto the target image, clipping to the target bounds.
pub fn apply_layer(target: &mut RgbaImage, layer: &WatermarkLayer) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let wm_width = layer.image.width() as i32;
    let wm_height = layer.image.height() as i32;

    let x_start = layer.position.x.max(0);
    let y_start = layer.position.y.max(0);
    let x_end = (layer.position.x + wm_width).min(target_width);
    let y_end = (layer.position.y + wm_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wx = (tx - layer.position.x) as u32;
            let wy = (ty - layer.position.y) as u32;

            let wm_pixel = layer.image.get_pixel(wx, wy);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*target_pixel, *wm_pixel, layer.opacity);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Porter-Duff "over" of `foreground` onto `background`, with the
/// foreground alpha scaled by `opacity`.
pub(crate) fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_for_level_in_range() {
        assert!((opacity_for_level(1) - 0.1).abs() < f32::EPSILON);
        assert!((opacity_for_level(7) - 0.7).abs() < f32::EPSILON);
        assert!((opacity_for_level(10) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_opacity_for_level_out_of_range_is_half() {
        for level in [0, -1, 11, 100, i32::MIN, i32::MAX] {
            assert_eq!(opacity_for_level(level), 0.5);
        }
    }

    #[test]
    fn test_remove_chroma_key_only_touches_opaque_green() {
        let mut img = RgbaImage::from_pixel(2, 1, CHROMA_KEY);
        img.put_pixel(1, 0, Rgba([0, 255, 0, 254]));
        remove_chroma_key(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([0, 255, 0, 254]));
    }

    #[test]
    fn test_blend_pixels_full_opacity_replaces() {
        let out = blend_pixels(Rgba([255, 255, 255, 255]), Rgba([10, 20, 30, 255]), 1.0);
        assert_eq!(out, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_blend_pixels_half_opacity_mixes() {
        let out = blend_pixels(Rgba([255, 255, 255, 255]), Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(out[3], 255);
        assert!((127..=128).contains(&out[0]));
    }

    #[test]
    fn test_blend_pixels_transparent_foreground_keeps_background() {
        let out = blend_pixels(Rgba([40, 50, 60, 255]), Rgba([0, 0, 0, 0]), 1.0);
        assert_eq!(out, Rgba([40, 50, 60, 255]));
    }

    #[test]
    fn test_apply_layer_clips_to_bounds() {
        let mut base = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let layer = WatermarkLayer {
            image: RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255])),
            position: PlacementPosition::new(2, -1),
            opacity: 1.0,
        };
        apply_layer(&mut base, &layer);

        assert_eq!(base.get_pixel(2, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(base.get_pixel(3, 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(base.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(base.get_pixel(1, 0), &Rgba([255, 255, 255, 255]));
    }
}
