//! Thumbnail generation for uploaded avatars.
//!
//! Decoding and resizing are CPU bound; callers run [`generate_preview`]
//! on the blocking pool.

use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, ImageReader, Limits, imageops::FilterType};

use hogwarts_core::{AppError, SchoolError};

/// Encoded thumbnail in the same format as its source.
#[derive(Debug)]
pub struct Preview {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl Preview {
    pub fn media_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Largest source side accepted by the decoder.
pub const MAX_SOURCE_SIDE: u32 = 8192;

/// Decoder allocation ceiling.
const MAX_DECODE_ALLOC: u64 = 64 * 1024 * 1024;

/// Tallest preview, as a multiple of its width.
pub const MAX_PREVIEW_ASPECT: u32 = 10;

/// Size of a thumbnail `target_width` pixels wide with the source's aspect
/// ratio. The height stays within `[1, target_width * MAX_PREVIEW_ASPECT]`.
pub fn preview_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let target_width = target_width.max(1);
    let max_height = u64::from(target_width) * u64::from(MAX_PREVIEW_ASPECT);
    let scaled = u64::from(height) * u64::from(target_width) / u64::from(width.max(1));
    let target_height = scaled.clamp(1, max_height.min(u64::from(u32::MAX))) as u32;
    (target_width, target_height)
}

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_SOURCE_SIDE);
    limits.max_image_height = Some(MAX_SOURCE_SIDE);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    limits
}

/// Decodes `bytes` under [`decode_limits`], returning the image and its format.
fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), SchoolError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| SchoolError::UnreadableImage)?;
    let format = reader.format().ok_or(SchoolError::UnreadableImage)?;
    reader.limits(decode_limits());

    let image = reader.decode().map_err(|_| SchoolError::UnreadableImage)?;
    Ok((image, format))
}

/// Decodes `bytes`, scales the image to `target_width`, and re-encodes it
/// in the detected format.
pub fn generate_preview(bytes: &[u8], target_width: u32) -> Result<Preview, AppError> {
    let (source, format) = decode(bytes)?;

    let (width, height) = preview_dimensions(source.width(), source.height(), target_width);
    let resized = source.resize_exact(width, height, FilterType::Triangle);

    // JPEG has no alpha channel
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => DynamicImage::ImageRgba8(resized.to_rgba8()),
    };

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, format)
        .with_context(|| format!("Failed to encode {:?} preview", format))?;

    Ok(Preview {
        bytes: out.into_inner(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([200u8, 30, 30, 255]));
        encode(DynamicImage::ImageRgba8(buffer), ImageFormat::Png)
    }

    #[test]
    fn test_dimensions_keep_aspect_ratio() {
        assert_eq!(preview_dimensions(200, 100, 100), (100, 50));
        assert_eq!(preview_dimensions(400, 300, 100), (100, 75));
        assert_eq!(preview_dimensions(50, 80, 100), (100, 160));
    }

    #[test]
    fn test_dimensions_height_at_least_one() {
        assert_eq!(preview_dimensions(1000, 1, 100), (100, 1));
        assert_eq!(preview_dimensions(0, 0, 100), (100, 1));
    }

    #[test]
    fn test_dimensions_height_is_capped() {
        assert_eq!(preview_dimensions(1, 400_000, 100), (100, 1000));
        assert_eq!(preview_dimensions(10, 100, 100), (100, 1000));
        assert_eq!(preview_dimensions(1, u32::MAX, u32::MAX), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_tall_png_preview_is_capped() {
        let preview = generate_preview(&png(2, 4000), 100).unwrap();

        let decoded = image::load_from_memory(&preview.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 1000));
    }

    #[test]
    fn test_oversized_source_is_unreadable() {
        let err = generate_preview(&png(1, MAX_SOURCE_SIDE + 1), 100).unwrap_err();
        assert_eq!(err.school_error(), Some(SchoolError::UnreadableImage));
    }

    #[test]
    fn test_png_preview_is_png() {
        let preview = generate_preview(&png(300, 150), 100).unwrap();
        assert_eq!(preview.format, ImageFormat::Png);
        assert_eq!(preview.media_type(), "image/png");

        let decoded = image::load_from_memory(&preview.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn test_jpeg_preview_is_jpeg() {
        let buffer = ImageBuffer::from_pixel(120, 240, Rgb([10u8, 120, 10]));
        let bytes = encode(DynamicImage::ImageRgb8(buffer), ImageFormat::Jpeg);

        let preview = generate_preview(&bytes, 100).unwrap();
        assert_eq!(preview.format, ImageFormat::Jpeg);

        let decoded = image::load_from_memory_with_format(&preview.bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 200));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = generate_preview(b"definitely not an image", 100).unwrap_err();
        assert_eq!(err.school_error(), Some(SchoolError::UnreadableImage));
    }

    #[test]
    fn test_truncated_png_is_unreadable() {
        let bytes = png(64, 64);
        let err = generate_preview(&bytes[..bytes.len() / 2], 100).unwrap_err();
        assert_eq!(err.school_error(), Some(SchoolError::UnreadableImage));
    }
}
