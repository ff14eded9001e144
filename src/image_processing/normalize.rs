use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::error::{StickerError, StickerResult};

/// Make sure a decoded image carries an alpha channel.
///
/// Three-channel images get a fully opaque alpha plane, four-channel images
/// pass through (reduced to 8 bits per channel). Gray or gray+alpha sources
/// are rejected.
pub fn ensure_alpha(img: DynamicImage) -> StickerResult<RgbaImage> {
    match img.color().channel_count() {
        3 => Ok(add_opaque_alpha(&img.into_rgb8())),
        4 => Ok(img.into_rgba8()),
        channels => Err(StickerError::UnsupportedFormat { channels }),
    }
}

fn add_opaque_alpha(rgb: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Rgba([r, g, b, 255])
    })
}
