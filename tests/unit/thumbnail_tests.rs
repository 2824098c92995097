// Thumbnail pipeline tests

use bizkit::thumbnail::*;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(img: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}

fn gradient(width: u32, height: u32) -> Vec<u8> {
    encode(
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }),
        ImageFormat::Png,
    )
}

fn dimensions(data: &[u8]) -> (u32, u32) {
    let img = decode_image(data).unwrap();
    (img.width(), img.height())
}

#[test]
fn test_fit_keeps_aspect_ratio() {
    let out = make_thumbnail(&gradient(640, 480), "thumb.png", 320, 320).unwrap();
    assert_eq!(dimensions(&out), (320, 240));
}

#[test]
fn test_fit_never_enlarges() {
    let data = gradient(64, 48);
    let out = make_thumbnail(&data, "jpg", 1000, 1000).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_fit_with_one_unbounded_axis() {
    let out = make_thumbnail(&gradient(400, 100), "png", 0, 50).unwrap();
    assert_eq!(dimensions(&out), (200, 50));
}

#[test]
fn test_fixed_height_mode() {
    let out =
        make_thumbnail_with_mode(&gradient(300, 100), "png", 0, 50, ThumbnailMode::parse("H"))
            .unwrap();
    assert_eq!(dimensions(&out), (150, 50));
}

#[test]
fn test_stretch_ignores_aspect_ratio() {
    let out =
        make_thumbnail_with_mode(&gradient(300, 100), "bmp", 40, 90, ThumbnailMode::Stretch)
            .unwrap();
    assert_eq!(&out[0..2], b"BM");
    assert_eq!(dimensions(&out), (40, 90));
}

#[test]
fn test_cut_crops_center_of_wide_image() {
    // left and right thirds red, middle third blue
    let src = RgbaImage::from_fn(90, 30, |x, _| {
        if (30..60).contains(&x) {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    let out = make_thumbnail_with_mode(
        &encode(src, ImageFormat::Png),
        "png",
        30,
        30,
        ThumbnailMode::Cut,
    )
    .unwrap();
    let img = decode_image(&out).unwrap().to_rgba8();
    let center = img.get_pixel(15, 15);
    assert!(center[2] > 200 && center[0] < 50);
}

#[test]
fn test_undecodable_input_is_an_error() {
    let err = make_thumbnail(b"definitely not an image", "png", 10, 10).unwrap_err();
    assert!(matches!(err, ImageError::DecodeFailed { .. }));
    assert!(err.to_string().contains("decode"));
}

#[test]
fn test_zero_size_mode_target_is_an_error() {
    let err = make_thumbnail_with_mode(&gradient(10, 10), "png", 0, 0, ThumbnailMode::Pad)
        .unwrap_err();
    assert!(matches!(err, ImageError::InvalidDimensions { .. }));
}

#[test]
fn test_cropped_thumbnail_from_jpeg_source() {
    let data = encode(
        RgbaImage::from_pixel(100, 100, Rgba([10, 200, 10, 255])),
        ImageFormat::Jpeg,
    );
    let out = make_cropped_thumbnail(&data, "gif", 25, 25, CropRect::new(-10, -10, 50, 50))
        .unwrap();
    assert_eq!(&out[0..3], b"GIF");
    assert_eq!(dimensions(&out), (25, 25));
}

#[test]
fn test_output_format_follows_extension() {
    assert_eq!(OutputFormat::from_extension("a.b.PNG"), OutputFormat::Png);
    assert_eq!(OutputFormat::from_extension("tiff"), OutputFormat::Jpeg);
}

#[test]
fn test_oversized_target_is_an_error_not_an_allocation() {
    let data = gradient(10, 10);
    let err = make_thumbnail_with_mode(&data, "png", 100_000, 100_000, ThumbnailMode::Stretch)
        .unwrap_err();
    assert!(matches!(err, ImageError::InvalidDimensions { .. }));

    let err = make_cropped_thumbnail(&data, "png", 100_000, 100_000, CropRect::new(0, 0, 5, 5))
        .unwrap_err();
    assert!(matches!(err, ImageError::InvalidDimensions { .. }));
}
