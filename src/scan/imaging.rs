//! Report image handling ahead of OCR: size guard, magic-byte format check,
//! greyscale conversion and PNG re-encoding.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma, RgbImage};
use serde::{Deserialize, Serialize};

use super::ScanError;

/// Maximum input image size (in bytes) before rejecting.
const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// Minimum valid image size in bytes (smallest valid PNG is ~67 bytes).
const MIN_IMAGE_BYTES: usize = 67;

/// Accepted report image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Png,
    Jpeg,
}

impl ReportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Validate image bytes before decoding.
pub fn validate_image_bytes(bytes: &[u8]) -> Result<(), ScanError> {
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(ScanError::ImageProcessing(
            "Image data too small to be valid".into(),
        ));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ScanError::ImageProcessing(format!(
            "Image data exceeds {}MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Detect the format from magic bytes (NOT file extensions).
pub fn detect_image_format(bytes: &[u8]) -> Result<ReportFormat, ScanError> {
    match bytes {
        // PNG: starts with 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ReportFormat::Png),
        // JPEG: starts with FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ReportFormat::Jpeg),
        _ => Err(ScanError::UnsupportedFormat),
    }
}

/// Decode and convert to greyscale.
pub fn to_greyscale(bytes: &[u8]) -> Result<GrayImage, ScanError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ScanError::ImageProcessing(format!("Decoding failed: {e}")))?;
    Ok(rgb_to_gray(&decoded.to_rgb8()))
}

/// Convert RGB image to grayscale using ITU-R BT.601 luminance.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = (rgb.width(), rgb.height());
    let mut gray = GrayImage::new(w, h);
    for (x, y, p) in rgb.enumerate_pixels() {
        let luma = (0.299 * p.0[0] as f32 + 0.587 * p.0[1] as f32 + 0.114 * p.0[2] as f32)
            .round()
            .min(255.0) as u8;
        gray.put_pixel(x, y, Luma([luma]));
    }
    gray
}

/// Encode a greyscale image as PNG bytes for the OCR engine.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, ScanError> {
    let dynamic = DynamicImage::ImageLuma8(img.clone());
    let mut cursor = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut cursor, ImageOutputFormat::Png)
        .map_err(|e| ScanError::ImageProcessing(format!("PNG encoding failed: {e}")))?;
    Ok(cursor.into_inner())
}
