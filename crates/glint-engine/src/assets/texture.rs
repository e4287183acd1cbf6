use std::path::Path;

use image::DynamicImage;

use crate::error::{RenderError, Result};
use crate::resources::{PixelFormat, PixelType};

/// Tightly packed pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub ty: PixelType,
    /// Row-major, top row first, `width × channels × size(ty)` bytes per row.
    pub pixels: Vec<u8>,
}

/// Decodes an encoded image into `format` × `ty`.
///
/// The file's own channel count must match `format`; no channel expansion
/// or reduction is performed. `path` is only used for error messages.
pub fn decode_image(
    path: &Path,
    bytes: &[u8],
    format: PixelFormat,
    ty: PixelType,
) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).map_err(|source| RenderError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let found = img.color().channel_count();
    if !matches!(found, 1 | 3 | 4) {
        return Err(RenderError::UnsupportedImageLayout {
            path: path.to_path_buf(),
            channels: found,
        });
    }
    if found != format.channels() {
        return Err(RenderError::ChannelMismatch {
            path: path.to_path_buf(),
            expected: format.channels(),
            found,
        });
    }

    Ok(DecodedImage {
        width: img.width(),
        height: img.height(),
        format,
        ty,
        pixels: convert(&img, format, ty),
    })
}

fn convert(img: &DynamicImage, format: PixelFormat, ty: PixelType) -> Vec<u8> {
    match (format, ty) {
        (PixelFormat::R, PixelType::Ubyte) => img.to_luma8().into_raw(),
        (PixelFormat::Rgb, PixelType::Ubyte) => img.to_rgb8().into_raw(),
        (PixelFormat::Rgba, PixelType::Ubyte) => img.to_rgba8().into_raw(),
        (PixelFormat::R, PixelType::Float) => {
            bytemuck::cast_slice(img.to_luma32f().as_raw()).to_vec()
        }
        (PixelFormat::Rgb, PixelType::Float) => {
            bytemuck::cast_slice(img.to_rgb32f().as_raw()).to_vec()
        }
        (PixelFormat::Rgba, PixelType::Float) => {
            bytemuck::cast_slice(img.to_rgba32f().as_raw()).to_vec()
        }
    }
}
