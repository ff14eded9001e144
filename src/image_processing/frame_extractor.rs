use anyhow::{anyhow, Result};
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::format_detector::SourceKind;
use crate::error::{StickerError, StickerResult};

/// Extract the first frame of an animated source as RGBA.
///
/// GIFs are decoded in palette-indexed mode and expanded here, so the color
/// table lookup stays under our control. Animated WebP goes through the
/// generic animation decoder, reading exactly one frame.
pub fn extract_first_frame(path: &Path, kind: SourceKind) -> StickerResult<RgbaImage> {
    let file = File::open(path).map_err(|e| StickerError::io(path, e))?;
    let reader = BufReader::new(file);

    let frame = match kind {
        SourceKind::AnimatedGif => decode_gif_first_frame(reader),
        SourceKind::AnimatedContainer => decode_webp_first_frame(reader),
        SourceKind::Static => Err(anyhow!("source is not animated")),
    };

    frame.map_err(|e| StickerError::decode(path, format!("{:#}", e)))
}

/// Decode the first GIF frame from `reader`.
pub fn decode_gif_first_frame<R: Read>(reader: R) -> Result<RgbaImage> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);

    let mut decoder = options.read_info(reader)?;
    let global_palette = decoder.global_palette().map(|p| p.to_vec());

    let frame = decoder
        .read_next_frame()?
        .ok_or_else(|| anyhow!("GIF contains no frames"))?;

    let palette = frame
        .palette
        .as_deref()
        .or(global_palette.as_deref())
        .ok_or_else(|| anyhow!("GIF has no color table"))?;

    expand_palette(
        &frame.buffer,
        palette,
        frame.transparent,
        frame.width as u32,
        frame.height as u32,
    )
}

/// Expand palette indices into an RGBA image.
///
/// `palette` holds packed RGB triples. Indices past the end of the table are
/// mapped to entry 0. The `transparent` index becomes alpha 0, everything
/// else is opaque.
pub fn expand_palette(
    indices: &[u8],
    palette: &[u8],
    transparent: Option<u8>,
    width: u32,
    height: u32,
) -> Result<RgbaImage> {
    let color_count = palette.len() / 3;
    if color_count == 0 {
        return Err(anyhow!("color table is empty"));
    }

    let expected = width as usize * height as usize;
    if indices.len() < expected {
        return Err(anyhow!(
            "frame data too short: {} pixels for a {}x{} frame",
            indices.len(),
            width,
            height
        ));
    }

    let mut output = RgbaImage::new(width, height);
    for (pixel, &raw_index) in output.pixels_mut().zip(indices) {
        let index = if (raw_index as usize) < color_count {
            raw_index as usize
        } else {
            0
        };
        let base = index * 3;
        let alpha = if transparent == Some(raw_index) { 0 } else { 255 };
        *pixel = Rgba([palette[base], palette[base + 1], palette[base + 2], alpha]);
    }

    Ok(output)
}

fn decode_webp_first_frame(reader: BufReader<File>) -> Result<RgbaImage> {
    let decoder = WebPDecoder::new(reader)?;
    let frame = decoder
        .into_frames()
        .next()
        .ok_or_else(|| anyhow!("animation contains no frames"))??;
    Ok(frame.into_buffer())
}
