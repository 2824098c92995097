//! Image encoder abstraction
//!
//! One encoder per output format behind a common trait. Only JPEG honours
//! the quality setting; the other formats are lossless or palette based.

use std::io::Cursor;

use image::DynamicImage;

use super::error::ImageError;
use super::params::OutputFormat;
use crate::constants::DEFAULT_IMAGE_QUALITY;

/// Quality settings for image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    /// Quality value (1-100, where 100 is best quality)
    pub quality: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self {
            quality: DEFAULT_IMAGE_QUALITY,
        }
    }
}

impl EncoderQuality {
    /// Create quality settings with specified quality level
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Quality from a caller-supplied integer; anything outside 0..=100
    /// falls back to the default of 80.
    ///
    /// In-range values are kept as given, including 0. The JPEG codec maps
    /// 0 onto its lowest quality step.
    pub fn from_request(quality: i32) -> Self {
        if (0..=100).contains(&quality) {
            Self {
                quality: quality as u8,
            }
        } else {
            Self::default()
        }
    }
}

/// Result of encoding an image
#[derive(Debug)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        let content_type = format.content_type();
        Self {
            data,
            format,
            content_type,
        }
    }
}

/// Trait for image encoders
///
/// Implementations take raw RGBA pixels (4 bytes per pixel) and produce the
/// encoded file bytes.
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError>;

    /// Check if this encoder keeps the alpha channel
    fn supports_transparency(&self) -> bool;
}

/// JPEG encoder with quality control
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;

        // JPEG has no alpha channel
        let rgb_data = rgba_to_rgb(data);

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality.quality);

        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| ImageError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Jpeg))
    }

    fn supports_transparency(&self) -> bool {
        false
    }
}

pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;

        let mut output = Cursor::new(Vec::new());
        ImagePngEncoder::new(&mut output)
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| ImageError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Png))
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

pub struct GifEncoder;

impl ImageEncoder for GifEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gif
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::gif::GifEncoder as ImageGifEncoder;

        let mut output = Cursor::new(Vec::new());
        {
            // the trailer is written when the encoder is dropped
            let mut encoder = ImageGifEncoder::new(&mut output);
            encoder
                .encode(data, width, height, image::ColorType::Rgba8)
                .map_err(|e| ImageError::encode_failed("gif", e.to_string()))?;
        }

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Gif))
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

pub struct BmpEncoder;

impl ImageEncoder for BmpEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Bmp
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, ImageError> {
        use image::codecs::bmp::BmpEncoder as ImageBmpEncoder;
        use image::ImageEncoder as _;

        let mut output = Cursor::new(Vec::new());
        ImageBmpEncoder::new(&mut output)
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| ImageError::encode_failed("bmp", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Bmp))
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::Gif => Box::new(GifEncoder),
            OutputFormat::Bmp => Box::new(BmpEncoder),
        }
    }
}

/// Encode a decoded image in the given format.
pub fn encode_image(
    img: &DynamicImage,
    format: OutputFormat,
    quality: EncoderQuality,
) -> Result<EncodedImage, ImageError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    EncoderFactory::create(format).encode(rgba.as_raw(), width, height, quality)
}

/// Convert RGBA to RGB by discarding alpha channel
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXELS_2X2: [u8; 16] = [
        255, 0, 0, 255, // Red
        0, 255, 0, 255, // Green
        0, 0, 255, 255, // Blue
        255, 255, 255, 128, // Semi-transparent white
    ];

    #[test]
    fn test_encoder_quality_default() {
        assert_eq!(EncoderQuality::default().quality, 80);
    }

    #[test]
    fn test_encoder_quality_clamps_values() {
        assert_eq!(EncoderQuality::with_quality(150).quality, 100);
        assert_eq!(EncoderQuality::with_quality(0).quality, 1);
    }

    #[test]
    fn test_encoder_quality_out_of_range_request_uses_default() {
        assert_eq!(EncoderQuality::from_request(-1).quality, 80);
        assert_eq!(EncoderQuality::from_request(101).quality, 80);
        assert_eq!(EncoderQuality::from_request(i32::MAX).quality, 80);
        assert_eq!(EncoderQuality::from_request(55).quality, 55);
        assert_eq!(EncoderQuality::from_request(100).quality, 100);
    }

    #[test]
    fn test_encoder_quality_zero_request_is_kept_and_encodes() {
        let quality = EncoderQuality::from_request(0);
        assert_eq!(quality.quality, 0);

        let encoded = JpegEncoder.encode(&PIXELS_2X2, 2, 2, quality).unwrap();
        assert_eq!(&encoded.data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encoder_factory_formats() {
        for format in [
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::Gif,
            OutputFormat::Bmp,
        ] {
            assert_eq!(EncoderFactory::create(format).format(), format);
        }
        assert!(!EncoderFactory::create(OutputFormat::Jpeg).supports_transparency());
    }

    #[test]
    fn test_rgba_to_rgb() {
        let rgba = vec![255, 128, 64, 255, 0, 0, 0, 128];
        assert_eq!(rgba_to_rgb(&rgba), vec![255, 128, 64, 0, 0, 0]);
    }

    #[test]
    fn test_jpeg_encoder_produces_output() {
        let encoded = JpegEncoder
            .encode(&PIXELS_2X2, 2, 2, EncoderQuality::default())
            .unwrap();
        assert_eq!(encoded.content_type, "image/jpeg");
        // JPEG magic bytes: FF D8
        assert_eq!(&encoded.data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_png_encoder_produces_output() {
        let encoded = PngEncoder
            .encode(&PIXELS_2X2, 2, 2, EncoderQuality::default())
            .unwrap();
        assert_eq!(&encoded.data[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_gif_encoder_produces_output() {
        let encoded = GifEncoder
            .encode(&PIXELS_2X2, 2, 2, EncoderQuality::default())
            .unwrap();
        assert_eq!(&encoded.data[0..3], b"GIF");
    }

    #[test]
    fn test_bmp_encoder_produces_output() {
        let encoded = BmpEncoder
            .encode(&PIXELS_2X2, 2, 2, EncoderQuality::default())
            .unwrap();
        assert_eq!(&encoded.data[0..2], b"BM");
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let img = image::RgbaImage::from_fn(64, 64, |x, y| {
            image::Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255])
        });
        let img = DynamicImage::ImageRgba8(img);
        let low = encode_image(&img, OutputFormat::Jpeg, EncoderQuality::with_quality(10)).unwrap();
        let high =
            encode_image(&img, OutputFormat::Jpeg, EncoderQuality::with_quality(95)).unwrap();
        assert!(low.data.len() < high.data.len());
    }
}
