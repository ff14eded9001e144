use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::OutputFormat;
use crate::error::{StickerError, StickerResult};

/// Encode `img` in the requested format and write it to `path`.
///
/// Missing parent directories are created. `quality` (1-100) only affects
/// WebP output; PNG is always written with maximum compression.
pub fn save_sticker(
    img: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> StickerResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| StickerError::io(parent, e))?;
        }
    }

    match format {
        OutputFormat::Png => save_png(img, path),
        OutputFormat::WebP => save_webp(img, path, quality),
    }
}

fn save_png(img: &RgbaImage, path: &Path) -> StickerResult<()> {
    let file = File::create(path).map_err(|e| StickerError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| StickerError::encode(path, e))?;

    writer.flush().map_err(|e| StickerError::io(path, e))
}

fn save_webp(img: &RgbaImage, path: &Path, quality: u8) -> StickerResult<()> {
    let encoder = webp::Encoder::from_rgba(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_simple(false, quality.clamp(1, 100) as f32)
        .map_err(|e| StickerError::encode(path, format!("{:?}", e)))?;

    std::fs::write(path, &*encoded).map_err(|e| StickerError::io(path, e))
}
