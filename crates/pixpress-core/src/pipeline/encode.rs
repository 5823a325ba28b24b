//! Output codecs, one variant per supported target format.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, DynamicImage};
use std::borrow::Cow;

/// Output formats advertised to callers.
pub const SUPPORTED_FORMATS: &[&str] = &["webp", "jpeg", "jpg", "png"];

/// An encoder strategy resolved from a request's format and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Lossy WebP at the given quality (0-100)
    WebP { quality: u8 },
    /// Baseline JPEG at the given quality (1-100)
    Jpeg { quality: u8 },
    /// Lossless PNG; quality does not apply
    Png,
}

impl Codec {
    /// Resolve a codec from a format name (case-insensitive).
    ///
    /// Returns `None` for formats outside [`SUPPORTED_FORMATS`].
    pub fn resolve(format: &str, quality: u8) -> Option<Self> {
        let quality = quality.min(100);
        match format.trim().to_ascii_lowercase().as_str() {
            "webp" => Some(Codec::WebP { quality }),
            // The JPEG encoder divides by quality; 0 is not a valid setting
            "jpeg" | "jpg" => Some(Codec::Jpeg {
                quality: quality.max(1),
            }),
            "png" => Some(Codec::Png),
            _ => None,
        }
    }

    /// Whether the codec discards information.
    pub fn is_lossy(&self) -> bool {
        !matches!(self, Codec::Png)
    }

    /// Encode `image` into an in-memory buffer.
    pub fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, String> {
        match *self {
            Codec::WebP { quality } => {
                let rgba = image.to_rgba8();
                let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
                let memory = encoder
                    .encode_simple(false, quality as f32)
                    .map_err(|e| format!("WebP encoding error: {:?}", e))?;
                Ok(memory.to_vec())
            }
            Codec::Jpeg { quality } => {
                // JPEG has no alpha channel
                let rgb = image.to_rgb8();
                let mut buffer = Vec::new();
                JpegEncoder::new_with_quality(&mut buffer, quality)
                    .encode_image(&rgb)
                    .map_err(|e| format!("JPEG encoding error: {}", e))?;
                Ok(buffer)
            }
            Codec::Png => {
                let image = png_compatible(image);
                let mut buffer = Vec::new();
                let encoder = PngEncoder::new_with_quality(
                    &mut buffer,
                    CompressionType::Best,
                    FilterType::Adaptive,
                );
                image
                    .write_with_encoder(encoder)
                    .map_err(|e| format!("PNG encoding error: {}", e))?;
                Ok(buffer)
            }
        }
    }
}

/// PNG has no float sample type; widen float images to 16 bits per channel.
fn png_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::Rgb32F => Cow::Owned(DynamicImage::ImageRgb16(image.to_rgb16())),
        ColorType::Rgba32F => Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16())),
        _ => Cow::Borrowed(image),
    }
}
