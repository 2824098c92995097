// Watermark pipeline tests

use bizkit::thumbnail::decode_image;
use bizkit::watermark::*;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn write_overlay(dir: &TempDir, img: RgbaImage) -> PathBuf {
    let path = dir.path().join("mark.png");
    std::fs::write(&path, png_bytes(img)).unwrap();
    path
}

fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|path| path.exists())
}

#[test]
fn test_opaque_overlay_lands_bottom_right() {
    let dir = TempDir::new().unwrap();
    let overlay = write_overlay(&dir, RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255])));
    let base = png_bytes(RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255])));

    let out = image_watermark(&base, "png", &overlay, Anchor::BottomRight, 95, 10).unwrap();

    // output is always JPEG
    assert_eq!(&out[0..2], &[0xFF, 0xD8]);
    let img = decode_image(&out).unwrap().to_rgba8();
    assert!(img.get_pixel(188, 188)[0] < 40);
    assert!(img.get_pixel(10, 10)[0] > 215);
}

#[test]
fn test_chroma_key_pixels_stay_invisible() {
    let dir = TempDir::new().unwrap();
    let overlay = write_overlay(&dir, RgbaImage::from_pixel(20, 20, Rgba([0, 255, 0, 255])));
    let base = png_bytes(RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255])));

    let out = image_watermark(&base, "png", &overlay, Anchor::Center, 95, 10).unwrap();
    let img = decode_image(&out).unwrap().to_rgba8();
    let p = img.get_pixel(50, 50);
    assert!(p[0] > 215 && p[1] > 215 && p[2] > 215);
}

#[test]
fn test_missing_overlay_returns_input_bytes() {
    let base = png_bytes(RgbaImage::new(50, 50));
    let out = image_watermark(
        &base,
        "png",
        "/nonexistent/mark.png",
        Anchor::TopLeft,
        80,
        5,
    )
    .unwrap();
    assert_eq!(out, base);
}

#[test]
fn test_overlay_as_large_as_base_returns_input_bytes() {
    let dir = TempDir::new().unwrap();
    let overlay = write_overlay(&dir, RgbaImage::new(50, 10));
    let base = png_bytes(RgbaImage::new(50, 50));
    let out = image_watermark(&base, "png", &overlay, Anchor::Center, 80, 5).unwrap();
    assert_eq!(out, base);
}

#[test]
fn test_undecodable_base_is_a_decode_error() {
    let err = image_watermark(b"garbage", "png", "/nonexistent", Anchor::Center, 80, 5)
        .unwrap_err();
    assert!(matches!(err, WatermarkError::DecodeError(_)));
}

#[test]
fn test_text_watermark_darkens_anchor_area() {
    let Some(font_path) = system_font() else {
        eprintln!("skipping test_text_watermark_darkens_anchor_area: no system font found");
        return;
    };
    let base = png_bytes(RgbaImage::from_pixel(300, 100, Rgba([200, 200, 200, 255])));
    let font = FontSpec::new(font_path, 32.0);

    let out = text_watermark(&base, "jpg", "MMMM", Anchor::Center, 95, &font).unwrap();
    let img = decode_image(&out).unwrap().to_rgba8();
    let darkest = img.pixels().map(|p| p[0]).min().unwrap();
    let lightest = img.pixels().map(|p| p[0]).max().unwrap();
    assert!(darkest < 60);
    assert!(lightest > 210);
}

#[test]
fn test_text_watermark_with_missing_font_is_a_font_error() {
    let base = png_bytes(RgbaImage::new(10, 10));
    let font = FontSpec::new("/nonexistent/font.ttf", 12.0);
    let err = text_watermark(&base, "jpg", "x", Anchor::Center, 80, &font).unwrap_err();
    assert!(matches!(err, WatermarkError::FontError(_)));
}

#[test]
fn test_anchor_parsing() {
    assert_eq!("bottom-right".parse::<Anchor>().unwrap(), Anchor::BottomRight);
    assert_eq!("5".parse::<Anchor>().unwrap(), Anchor::Center);
    assert!("sideways".parse::<Anchor>().is_err());
}
