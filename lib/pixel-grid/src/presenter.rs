use crate::{PixelGridResult, ensure_not_empty, resample::scale_nearest};
use image::{Rgb, RgbImage, imageops};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Places `original` and `pixelated` next to each other for comparison.
///
/// The narrower of the two is scaled with nearest neighbor (keeping its
/// aspect ratio) to the width of the wider one. The canvas is as tall as the
/// taller result and the remaining area is white.
pub fn side_by_side(original: &RgbImage, pixelated: &RgbImage) -> PixelGridResult<RgbImage> {
    ensure_not_empty(original)?;
    ensure_not_empty(pixelated)?;

    let width = original.width().max(pixelated.width());
    let left = scale_to_width(original, width);
    let right = scale_to_width(pixelated, width);
    let height = left.height().max(right.height());

    let mut canvas = RgbImage::from_pixel(width * 2, height, BACKGROUND);
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, width as i64, 0);

    Ok(canvas)
}

fn scale_to_width(image: &RgbImage, width: u32) -> RgbImage {
    if image.width() == width {
        return image.clone();
    }

    let height = (image.height() as u64 * width as u64 / image.width() as u64).max(1) as u32;
    scale_nearest(image, width, height)
}
