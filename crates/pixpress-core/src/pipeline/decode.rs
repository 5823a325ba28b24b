//! Image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::JobError;

/// Decodes source images. Stateless; every call is independent.
pub struct ImageDecoder;

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected source format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Read and decode the image at `path`.
    pub fn decode(path: &Path) -> Result<DecodedImage, JobError> {
        let bytes = std::fs::read(path).map_err(|e| JobError::DecodeFailed {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;
        Self::decode_bytes(bytes, path)
    }

    /// Decode an in-memory buffer. `path` is used for the extension fallback
    /// and for error context.
    pub fn decode_bytes(bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, JobError> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| JobError::DecodeFailed {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(path).map_err(|_| JobError::DecodeFailed {
                    path: path.to_path_buf(),
                    message: "Unrecognized image format".to_string(),
                })?;
                reader.set_format(f);
                f
            }
        };

        let image = reader.decode().map_err(|e| JobError::DecodeFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}
