//! Screenshot functionality for capturing rendered frames.

use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Options for taking screenshots.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotOptions {
    /// Whether to keep the rendered alpha channel (PNG only).
    ///
    /// When false every pixel is written fully opaque.
    pub transparent_background: bool,
}

fn prepare_pixels(data: &[u8], options: &ScreenshotOptions) -> Vec<u8> {
    let mut rgba_data = data.to_vec();
    if !options.transparent_background {
        for chunk in rgba_data.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
    }
    rgba_data
}

/// Saves raw RGBA pixel data to an image file.
///
/// # Arguments
/// * `filename` - Output filename (supports .png, .jpg, .jpeg)
/// * `data` - Raw RGBA pixel data (4 bytes per pixel, top-left origin)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `options` - Screenshot options
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_image(
    filename: impl AsRef<Path>,
    data: &[u8],
    width: u32,
    height: u32,
    options: &ScreenshotOptions,
) -> Result<(), ScreenshotError> {
    let path = filename.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, prepare_pixels(data, options))
            .ok_or(ScreenshotError::InvalidImageData)?;

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(ScreenshotError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved {}x{} screenshot to {}", width, height, path.display());
    Ok(())
}

/// Encodes raw RGBA pixel data as PNG in memory.
///
/// # Returns
/// PNG-encoded image data as a byte vector.
pub fn save_to_buffer(
    data: &[u8],
    width: u32,
    height: u32,
    options: &ScreenshotOptions,
) -> Result<Vec<u8>, ScreenshotError> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, prepare_pixels(data, options))
            .ok_or(ScreenshotError::InvalidImageData)?;

    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;

    Ok(buffer.into_inner())
}

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image data")]
    InvalidImageData,
}
