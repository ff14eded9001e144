use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbaImage;

use super::sizing::sticker_size;
use crate::error::{StickerError, StickerResult};

/// Resize an RGBA image to sticker dimensions.
///
/// The target comes from [`sticker_size`], so the aspect ratio is kept and
/// the longer side ends up at exactly 512 pixels.
pub fn resize_for_sticker(img: &RgbaImage) -> StickerResult<RgbaImage> {
    let (src_width, src_height) = img.dimensions();
    let (width, height) = sticker_size(src_width, src_height).ok_or_else(|| {
        StickerError::Resize(format!(
            "cannot resize an empty {}x{} image",
            src_width, src_height
        ))
    })?;

    resize_image(img, width, height)
}

/// Resize an image to exact dimensions using Lanczos3
pub fn resize_image(img: &RgbaImage, width: u32, height: u32) -> StickerResult<RgbaImage> {
    let (src_width, src_height) = img.dimensions();

    if src_width == width && src_height == height {
        return Ok(img.clone());
    }

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(resize_error)?;

    let mut dst_image = Image::new(width, height, PixelType::U8x4);

    // Alpha is premultiplied during convolution so transparent edges don't bleed
    let options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
        .use_alpha(true);

    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(resize_error)?;

    RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| resize_error("resized buffer has unexpected length"))
}

fn resize_error(reason: impl ToString) -> StickerError {
    StickerError::Resize(reason.to_string())
}
