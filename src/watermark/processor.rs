//! Watermark pipelines.
//!
//! Both pipelines decode the base image, draw the overlay at its anchor and
//! re-encode as JPEG with the requested quality. Should JPEG encoding fail,
//! the image is written in the format picked from the extension instead,
//! without quality control.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use super::compositor::{apply_layer, opacity_for_level, remove_chroma_key, WatermarkLayer};
use super::position::{image_anchor_offset, text_anchor_offset, Anchor};
use super::text_renderer::{draw_text, measure_text, Color, FontSpec, WatermarkFont};
use super::WatermarkError;
use crate::thumbnail::{decode_image, encode_image, EncoderQuality, OutputFormat};

/// Overlay the image at `overlay_path` onto `data`.
///
/// Returns `data` unchanged when the overlay file does not exist, or when
/// the overlay is at least as wide or as tall as the base image.
/// `transparency` is a 1-10 opacity level (anything else means 5);
/// `quality` outside 0-100 means 80.
pub fn image_watermark(
    data: &[u8],
    ext: &str,
    overlay_path: impl AsRef<Path>,
    anchor: Anchor,
    quality: i32,
    transparency: i32,
) -> Result<Vec<u8>, WatermarkError> {
    let overlay_path = overlay_path.as_ref();
    let base = decode_image(data)?;

    if !overlay_path.is_file() {
        tracing::warn!(
            path = %overlay_path.display(),
            "Watermark file not found, leaving image unchanged"
        );
        return Ok(data.to_vec());
    }

    let overlay_bytes = std::fs::read(overlay_path)
        .map_err(|e| WatermarkError::IoError(format!("{}: {}", overlay_path.display(), e)))?;
    let mut overlay = decode_image(&overlay_bytes)?.to_rgba8();

    if overlay.width() >= base.width() || overlay.height() >= base.height() {
        tracing::debug!(
            base_width = base.width(),
            base_height = base.height(),
            overlay_width = overlay.width(),
            overlay_height = overlay.height(),
            "Watermark does not fit inside the image, leaving image unchanged"
        );
        return Ok(data.to_vec());
    }

    let mut canvas = base.to_rgba8();

    if let Some(position) = image_anchor_offset(
        anchor,
        (canvas.width(), canvas.height()),
        (overlay.width(), overlay.height()),
    ) {
        remove_chroma_key(&mut overlay);
        let layer = WatermarkLayer {
            image: overlay,
            position,
            opacity: opacity_for_level(transparency),
        };
        tracing::debug!(?layer, anchor = anchor.code(), "Applying image watermark");
        apply_layer(&mut canvas, &layer);
    }

    encode_watermarked(canvas, ext, quality)
}

/// Draw `text` onto `data` using the font described by `font`.
///
/// A white copy is drawn one pixel down and right of a black copy so the
/// text stays legible on any background. `Anchor::None` draws nothing but
/// the image is still re-encoded.
pub fn text_watermark(
    data: &[u8],
    ext: &str,
    text: &str,
    anchor: Anchor,
    quality: i32,
    font: &FontSpec,
) -> Result<Vec<u8>, WatermarkError> {
    let base = decode_image(data)?;
    let font = WatermarkFont::load(font)?;
    let mut canvas = base.to_rgba8();

    let size = measure_text(&font, text);
    if let Some((x, y)) = text_anchor_offset(anchor, (canvas.width(), canvas.height()), size) {
        tracing::debug!(x, y, width = size.0, height = size.1, "Applying text watermark");
        draw_text(&mut canvas, &font, text, (x + 1.0, y + 1.0), Color::white());
        draw_text(&mut canvas, &font, text, (x, y), Color::black());
    }

    encode_watermarked(canvas, ext, quality)
}

fn encode_watermarked(
    canvas: RgbaImage,
    ext: &str,
    quality: i32,
) -> Result<Vec<u8>, WatermarkError> {
    let image = DynamicImage::ImageRgba8(canvas);

    match encode_image(
        &image,
        OutputFormat::Jpeg,
        EncoderQuality::from_request(quality),
    ) {
        Ok(encoded) => Ok(encoded.data),
        Err(err) => {
            let fallback = OutputFormat::from_extension(ext);
            tracing::warn!(
                error = %err,
                fallback = %fallback,
                "JPEG encoding failed, falling back to extension format"
            );
            let encoded = encode_image(&image, fallback, EncoderQuality::default())?;
            Ok(encoded.data)
        }
    }
}
