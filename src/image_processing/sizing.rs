/// Maximum edge length of a sticker, in pixels.
pub const STICKER_BOUND: u32 = 512;

/// Compute the sticker dimensions for a `width`×`height` source.
///
/// The source is scaled uniformly by `STICKER_BOUND / max(width, height)`:
/// the longer side becomes exactly 512 and the shorter side is rounded to the
/// nearest pixel, never below 1. Small sources are enlarged, large ones are
/// shrunk. Because the math is done on integers, feeding the result back in
/// returns it unchanged.
///
/// Returns `None` if either dimension is zero.
pub fn sticker_size(width: u32, height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }

    if width >= height {
        Some((STICKER_BOUND, scale_short_side(height, width)))
    } else {
        Some((scale_short_side(width, height), STICKER_BOUND))
    }
}

/// `round(STICKER_BOUND * short / long)`, clamped to `[1, STICKER_BOUND]`.
fn scale_short_side(short: u32, long: u32) -> u32 {
    let short = short as u64;
    let long = long as u64;
    let bound = STICKER_BOUND as u64;

    let scaled = (bound * short + long / 2) / long;
    scaled.clamp(1, bound) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_source() {
        assert_eq!(sticker_size(1024, 768), Some((512, 384)));
        assert_eq!(sticker_size(1920, 1080), Some((512, 288)));
    }

    #[test]
    fn test_portrait_source() {
        assert_eq!(sticker_size(768, 1024), Some((384, 512)));
        assert_eq!(sticker_size(100, 200), Some((256, 512)));
    }

    #[test]
    fn test_square_source() {
        assert_eq!(sticker_size(512, 512), Some((512, 512)));
        assert_eq!(sticker_size(64, 64), Some((512, 512)));
        assert_eq!(sticker_size(4000, 4000), Some((512, 512)));
    }

    #[test]
    fn test_small_source_is_enlarged() {
        assert_eq!(sticker_size(100, 50), Some((512, 256)));
        assert_eq!(sticker_size(1, 1), Some((512, 512)));
    }

    #[test]
    fn test_extreme_aspect_never_zero() {
        assert_eq!(sticker_size(10_000, 1), Some((512, 1)));
        assert_eq!(sticker_size(1, 10_000), Some((1, 512)));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(sticker_size(0, 100), None);
        assert_eq!(sticker_size(100, 0), None);
    }

    #[test]
    fn test_rounding_to_nearest() {
        // 512 * 333 / 1000 = 170.496
        assert_eq!(sticker_size(1000, 333), Some((512, 170)));
        // 512 * 335 / 1000 = 171.52
        assert_eq!(sticker_size(1000, 335), Some((512, 172)));
    }

    #[test]
    fn test_bounds_and_aspect_over_grid() {
        let sizes = [1u32, 2, 3, 7, 50, 99, 256, 511, 512, 513, 700, 1023, 2048, 5000];
        for &w in &sizes {
            for &h in &sizes {
                let (tw, th) = sticker_size(w, h).unwrap();
                assert!((1..=STICKER_BOUND).contains(&tw), "{}x{} -> {}x{}", w, h, tw, th);
                assert!((1..=STICKER_BOUND).contains(&th), "{}x{} -> {}x{}", w, h, tw, th);
                assert!(tw == STICKER_BOUND || th == STICKER_BOUND);

                // Aspect ratio survives up to one pixel of rounding on the short side.
                let (long, short) = if w >= h { (w, h) } else { (h, w) };
                let (t_long, t_short) = if tw >= th { (tw, th) } else { (th, tw) };
                let expected = STICKER_BOUND as f64 * short as f64 / long as f64;
                assert!(
                    (t_short as f64 - expected.max(1.0)).abs() <= 0.5 + f64::EPSILON,
                    "{}x{} -> {}x{}",
                    w,
                    h,
                    tw,
                    th
                );
                assert_eq!(t_long, STICKER_BOUND);
            }
        }
    }

    #[test]
    fn test_applying_twice_is_identity() {
        for &(w, h) in &[(1920, 1080), (300, 800), (512, 1), (640, 640), (3, 7)] {
            let first = sticker_size(w, h).unwrap();
            let second = sticker_size(first.0, first.1).unwrap();
            assert_eq!(first, second);
        }
    }
}
