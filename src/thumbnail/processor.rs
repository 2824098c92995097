//! Thumbnail processing pipeline
//!
//! Decode, plan the geometry, render the source window onto a canvas,
//! resize with Lanczos3 and encode in the format picked from the extension.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::io::Reader as ImageReader;
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::num::NonZeroU32;

use super::encoder::{encode_image, EncoderQuality};
use super::error::ImageError;
use super::geometry::{self, Dimensions, SourceWindow};
use super::params::{CropRect, OutputFormat, ThumbnailMode};
use crate::constants::MAX_CANVAS_PIXELS;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Shrink an image to fit within `max_width`×`max_height`.
///
/// Returns the input bytes untouched when the image already fits. A maximum
/// of zero or less leaves that axis unbounded.
pub fn make_thumbnail(
    data: &[u8],
    ext: &str,
    max_width: i32,
    max_height: i32,
) -> Result<Vec<u8>, ImageError> {
    let img = decode_image(data)?;
    let original = Dimensions::new(img.width(), img.height());
    let target = geometry::fit_within(original.width, original.height, max_width, max_height);

    if target == original {
        tracing::debug!(
            width = original.width,
            height = original.height,
            "Image already fits, returning original bytes"
        );
        return Ok(data.to_vec());
    }

    let resized = resize_image(&img, target.width, target.height)?;
    let encoded = encode_image(
        &resized,
        OutputFormat::from_extension(ext),
        EncoderQuality::default(),
    )?;
    Ok(encoded.data)
}

/// Produce a `width`×`height` thumbnail using one of the legacy modes.
///
/// The planned source window is drawn over a white canvas, so any part of
/// the window outside the source stays white.
pub fn make_thumbnail_with_mode(
    data: &[u8],
    ext: &str,
    width: u32,
    height: u32,
    mode: ThumbnailMode,
) -> Result<Vec<u8>, ImageError> {
    let img = decode_image(data)?;
    let plan = geometry::plan(Dimensions::new(img.width(), img.height()), width, height, mode)?;

    let canvas = render_window(&img.to_rgba8(), plan.source, WHITE)?;
    let resized = resize_image(
        &DynamicImage::ImageRgba8(canvas),
        plan.target.width,
        plan.target.height,
    )?;

    let encoded = encode_image(
        &resized,
        OutputFormat::from_extension(ext),
        EncoderQuality::default(),
    )?;
    Ok(encoded.data)
}

/// Cut `crop` out of the source onto a transparent canvas and scale it to
/// exactly `max_width`×`max_height`.
pub fn make_cropped_thumbnail(
    data: &[u8],
    ext: &str,
    max_width: u32,
    max_height: u32,
    crop: CropRect,
) -> Result<Vec<u8>, ImageError> {
    let img = decode_image(data)?;
    let window = SourceWindow {
        x: crop.x as i64,
        y: crop.y as i64,
        width: crop.width as i64,
        height: crop.height as i64,
    };

    let canvas = render_window(&img.to_rgba8(), window, TRANSPARENT)?;
    let resized = resize_image(&DynamicImage::ImageRgba8(canvas), max_width, max_height)?;

    let encoded = encode_image(
        &resized,
        OutputFormat::from_extension(ext),
        EncoderQuality::default(),
    )?;
    Ok(encoded.data)
}

/// Decode image data into a DynamicImage
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}

/// Copy `window` out of `src` onto a canvas of the window's size filled
/// with `background`. Source pixels are alpha-blended over the background.
fn render_window(
    src: &RgbaImage,
    window: SourceWindow,
    background: Rgba<u8>,
) -> Result<RgbaImage, ImageError> {
    if window.width <= 0 || window.height <= 0 {
        return Err(ImageError::invalid_dimensions(
            window.width,
            window.height,
            "source window is empty",
        ));
    }
    if window.width.saturating_mul(window.height) > MAX_CANVAS_PIXELS {
        return Err(ImageError::invalid_dimensions(
            window.width,
            window.height,
            format!("canvas exceeds {} pixels", MAX_CANVAS_PIXELS),
        ));
    }

    let mut canvas = RgbaImage::from_pixel(window.width as u32, window.height as u32, background);
    if background == TRANSPARENT {
        imageops::replace(&mut canvas, src, -window.x, -window.y);
    } else {
        imageops::overlay(&mut canvas, src, -window.x, -window.y);
    }
    Ok(canvas)
}

/// Resize image using fast-image-resize with Lanczos3 filter
///
/// Targets larger than `MAX_CANVAS_PIXELS` are rejected before any buffer
/// is allocated.
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, ImageError> {
    if (target_w as i64).saturating_mul(target_h as i64) > MAX_CANVAS_PIXELS {
        return Err(ImageError::invalid_dimensions(
            target_w as i64,
            target_h as i64,
            format!("resize target exceeds {} pixels", MAX_CANVAS_PIXELS),
        ));
    }

    let src_width =
        NonZeroU32::new(img.width()).ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    let rgba_image = RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}
