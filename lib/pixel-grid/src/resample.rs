//! Nearest neighbor resampling and canvas padding

use image::RgbImage;

/// Nearest neighbor scaling.
///
/// Source coordinates are computed with integer arithmetic, so shrinking by an
/// exact factor `b` samples the top-left pixel of every `b x b` block and
/// growing by `b` replicates each pixel into a `b x b` block.
pub fn scale_nearest(image: &RgbImage, dst_width: u32, dst_height: u32) -> RgbImage {
    let (src_width, src_height) = image.dimensions();
    if (dst_width, dst_height) == (src_width, src_height) {
        return image.clone();
    }

    if src_width == 0 || src_height == 0 {
        return RgbImage::new(dst_width, dst_height);
    }

    RgbImage::from_fn(dst_width, dst_height, |x, y| {
        let src_x = (x as u64 * src_width as u64 / dst_width as u64).min(src_width as u64 - 1);
        let src_y = (y as u64 * src_height as u64 / dst_height as u64).min(src_height as u64 - 1);
        *image.get_pixel(src_x as u32, src_y as u32)
    })
}

/// Grows the image to `width x height` by repeating its last column and row.
/// Never shrinks: the result is at least as large as `image` on both axes.
pub fn pad_replicate(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_width, src_height) = image.dimensions();
    let (width, height) = (width.max(src_width), height.max(src_height));
    if (width, height) == (src_width, src_height) || src_width == 0 || src_height == 0 {
        return image.clone();
    }

    RgbImage::from_fn(width, height, |x, y| {
        *image.get_pixel(x.min(src_width - 1), y.min(src_height - 1))
    })
}

/// Smallest multiple of `block` that is >= `value`, `None` on overflow
pub fn round_up_to_multiple(value: u32, block: u32) -> Option<u32> {
    value.div_ceil(block).checked_mul(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn test_scale_nearest_up() {
        let src = RgbImage::from_fn(3, 1, |x, _| [RED, GREEN, BLUE][x as usize]);
        let dst = scale_nearest(&src, 6, 1);

        let expected = [RED, RED, GREEN, GREEN, BLUE, BLUE];
        for (x, color) in expected.iter().enumerate() {
            assert_eq!(dst.get_pixel(x as u32, 0), color);
        }
    }

    #[test]
    fn test_scale_nearest_down_samples_top_left() {
        let src = RgbImage::from_fn(6, 3, |x, y| Rgb([x as u8, y as u8, 0]));
        let dst = scale_nearest(&src, 2, 1);

        assert_eq!(dst.dimensions(), (2, 1));
        assert_eq!(dst.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(dst.get_pixel(1, 0), &Rgb([3, 0, 0]));
    }

    #[test]
    fn test_scale_nearest_same_size_is_copy() {
        let src = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 7]));
        assert_eq!(scale_nearest(&src, 4, 4), src);
    }

    #[test]
    fn test_pad_replicate() {
        let src = RgbImage::from_fn(2, 2, |x, y| Rgb([x as u8, y as u8, 0]));
        let padded = pad_replicate(&src, 4, 3);

        assert_eq!(padded.dimensions(), (4, 3));
        assert_eq!(padded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(padded.get_pixel(3, 0), &Rgb([1, 0, 0]));
        assert_eq!(padded.get_pixel(0, 2), &Rgb([0, 1, 0]));
        assert_eq!(padded.get_pixel(3, 2), &Rgb([1, 1, 0]));
    }

    #[test]
    fn test_round_up_to_multiple() {
        assert_eq!(round_up_to_multiple(10, 5), Some(10));
        assert_eq!(round_up_to_multiple(11, 5), Some(15));
        assert_eq!(round_up_to_multiple(1, 8), Some(8));
        assert_eq!(round_up_to_multiple(7, 1), Some(7));
        assert_eq!(round_up_to_multiple(u32::MAX, 2), None);
    }
}
