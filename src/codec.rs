// SPDX-License-Identifier: GPL-3.0-only

//! Still image encoding and decoding
//!
//! Captured stills are stored as JPEG. The codec sits behind a trait so the
//! capture flow can be exercised without a real encoder.

use crate::constants::EncodingQuality;
use crate::errors::{AppError, AppResult, CaptureError};
use crate::filters::PixelBuffer;
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::{debug, info};

/// Encodes a filtered frame into still-image bytes
pub trait ImageCodec {
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, CaptureError>;

    /// File extension for the produced format
    fn extension(&self) -> &'static str;
}

/// Lossy JPEG encoder; alpha is discarded
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec {
    quality: EncodingQuality,
}

impl JpegCodec {
    pub fn new(quality: EncodingQuality) -> Self {
        Self { quality }
    }
}

impl ImageCodec for JpegCodec {
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, CaptureError> {
        let mut rgb = Vec::with_capacity(buffer.pixels().len() * 3);
        for px in buffer.pixels() {
            rgb.extend_from_slice(&px[..3]);
        }

        let mut data = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut data, self.quality.jpeg_quality())
            .encode(
                &rgb,
                buffer.width(),
                buffer.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| CaptureError::Encoding(format!("JPEG: {}", e)))?;

        debug!(
            width = buffer.width(),
            height = buffer.height(),
            size = data.len(),
            "Encoded JPEG still"
        );
        Ok(data)
    }

    fn extension(&self) -> &'static str {
        "jpg"
    }
}

/// Decode encoded image bytes into an RGBA buffer
pub fn decode(bytes: &[u8]) -> AppResult<PixelBuffer> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Load an image file from disk into an RGBA buffer
pub fn decode_file(path: &Path) -> AppResult<PixelBuffer> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    info!(path = %path.display(), width, height, "Loaded image");
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Write a buffer to disk, picking the format from the file extension
pub fn save_file(buffer: &PixelBuffer, path: &Path) -> AppResult<()> {
    let format = ImageFormat::from_path(path)?;
    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or_else(|| AppError::Codec("buffer does not match its dimensions".to_string()))?;

    // JPEG has no alpha channel
    if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .save_with_format(path, format)?;
    } else {
        image.save_with_format(path, format)?;
    }

    info!(path = %path.display(), ?format, "Saved image");
    Ok(())
}
