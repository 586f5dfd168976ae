use crate::{
    PixelGridError, PixelGridResult, ensure_not_empty,
    resample::{pad_replicate, round_up_to_multiple, scale_nearest},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{RgbImage, imageops::FilterType};

/// Upper bound on the same-size canvas, 256 Mpx
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelateMode {
    /// Full-resolution output made of flat `block_size` squares
    #[default]
    SameSize,
    /// One output pixel per block
    Downscale,
}

/// How the source is brought to a multiple of the block size in `SameSize` mode
#[derive(Debug, Clone, Copy, Default)]
pub enum CanvasFit {
    /// Repeat the last column and row
    #[default]
    Pad,
    /// Resize the whole image with the given filter
    Stretch(FilterType),
}

/// Pixelate configuration
/// Note: colors are point sampled at the top-left of every block, never averaged
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PixelateConfig {
    #[derivative(Default(value = "10"))]
    pub block_size: u32,

    #[derivative(Default(value = "PixelateMode::SameSize"))]
    pub mode: PixelateMode,

    #[derivative(Default(value = "CanvasFit::Pad"))]
    pub fit: CanvasFit,
}

impl PixelateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, image: &RgbImage) -> PixelGridResult<RgbImage> {
        ensure_not_empty(image)?;
        let block_size = ensure_block_size(image, self.block_size)?;

        let result = match self.mode {
            PixelateMode::Downscale => downscale(image, block_size),
            PixelateMode::SameSize => {
                let mut canvas = fit_canvas(image, block_size, self.fit)?;
                fill_blocks(&mut canvas, block_size);
                canvas
            }
        };

        log::debug!(
            "pixelated {}x{} -> {}x{} with block size {} ({:?})",
            image.width(),
            image.height(),
            result.width(),
            result.height(),
            block_size,
            self.mode
        );

        Ok(result)
    }
}

/// Same-size pixelation with edge padding
pub fn pixelate(image: &RgbImage, block_size: u32) -> PixelGridResult<RgbImage> {
    PixelateConfig::new().with_block_size(block_size).apply(image)
}

/// Same-size pixelation expressed as a nearest neighbor shrink to one pixel
/// per block followed by a nearest neighbor grow back to the canvas size.
/// Produces the same pixels as [`pixelate`] for the same `fit`.
pub fn pixelate_by_resize(
    image: &RgbImage,
    block_size: u32,
    fit: CanvasFit,
) -> PixelGridResult<RgbImage> {
    ensure_not_empty(image)?;
    let block_size = ensure_block_size(image, block_size)?;

    let canvas = fit_canvas(image, block_size, fit)?;
    let (width, height) = canvas.dimensions();
    let small = scale_nearest(&canvas, width / block_size, height / block_size);

    Ok(scale_nearest(&small, width, height))
}

/// A block may not be larger than the longer side of the image
fn ensure_block_size(image: &RgbImage, block_size: u32) -> PixelGridResult<u32> {
    if block_size == 0 {
        return Err(PixelGridError::Validation(
            "block_size must be at least 1".to_string(),
        ));
    }

    let longest = image.width().max(image.height());
    if block_size > longest {
        return Err(PixelGridError::Validation(format!(
            "block_size {block_size} exceeds the {}x{} image",
            image.width(),
            image.height()
        )));
    }

    Ok(block_size)
}

/// Size of the same-size canvas: both sides rounded up to a multiple of the
/// block, at most `MAX_CANVAS_PIXELS` in total
fn canvas_size(image: &RgbImage, block_size: u32) -> PixelGridResult<(u32, u32)> {
    let too_large = || {
        PixelGridError::Validation(format!(
            "block_size {block_size} pads the {}x{} image beyond {MAX_CANVAS_PIXELS} pixels",
            image.width(),
            image.height()
        ))
    };

    let width = round_up_to_multiple(image.width(), block_size).ok_or_else(too_large)?;
    let height = round_up_to_multiple(image.height(), block_size).ok_or_else(too_large)?;

    if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
        return Err(too_large());
    }

    Ok((width, height))
}

fn downscale(image: &RgbImage, block_size: u32) -> RgbImage {
    let width = image.width().div_ceil(block_size);
    let height = image.height().div_ceil(block_size);

    RgbImage::from_fn(width, height, |x, y| {
        *image.get_pixel(x * block_size, y * block_size)
    })
}

fn fit_canvas(image: &RgbImage, block_size: u32, fit: CanvasFit) -> PixelGridResult<RgbImage> {
    let (width, height) = canvas_size(image, block_size)?;

    if (width, height) == image.dimensions() {
        return Ok(image.clone());
    }

    Ok(match fit {
        CanvasFit::Pad => pad_replicate(image, width, height),
        CanvasFit::Stretch(FilterType::Nearest) => scale_nearest(image, width, height),
        CanvasFit::Stretch(filter) => image::imageops::resize(image, width, height, filter),
    })
}

fn fill_blocks(canvas: &mut RgbImage, block_size: u32) {
    let (width, height) = canvas.dimensions();

    for y in (0..height).step_by(block_size as usize) {
        for x in (0..width).step_by(block_size as usize) {
            let color = *canvas.get_pixel(x, y);

            let y_end = (y + block_size).min(height);
            let x_end = (x + block_size).min(width);

            for by in y..y_end {
                for bx in x..x_end {
                    canvas.put_pixel(bx, by, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 5 % 256) as u8])
        })
    }

    fn quadrants() -> RgbImage {
        RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgb([255, 0, 0]),
            (false, true) => Rgb([0, 255, 0]),
            (true, false) => Rgb([0, 0, 255]),
            (false, false) => Rgb([255, 255, 0]),
        })
    }

    fn assert_uniform_blocks(image: &RgbImage, block_size: u32) {
        for (x, y, pixel) in image.enumerate_pixels() {
            let origin = image.get_pixel(x - x % block_size, y - y % block_size);
            assert_eq!(pixel, origin, "pixel ({x}, {y}) differs from its block origin");
        }
    }

    #[test]
    fn test_block_size_one_is_identity() {
        let image = gradient(13, 9);
        assert_eq!(pixelate(&image, 1).unwrap(), image);
    }

    #[test]
    fn test_quadrants_are_unchanged() {
        let image = quadrants();
        let result = pixelate(&image, 2).unwrap();
        assert_eq!(result.as_raw(), image.as_raw());
    }

    #[test]
    fn test_same_size_blocks_are_uniform() {
        let image = gradient(23, 17);

        for block_size in 1..8 {
            let result = pixelate(&image, block_size).unwrap();
            assert_eq!(result.width() % block_size, 0);
            assert_eq!(result.height() % block_size, 0);
            assert!(result.width() >= image.width());
            assert!(result.height() >= image.height());
            assert_uniform_blocks(&result, block_size);
        }
    }

    #[test]
    fn test_same_size_samples_top_left() {
        let image = gradient(10, 10);
        let result = pixelate(&image, 4).unwrap();

        assert_eq!(result.dimensions(), (12, 12));
        assert_eq!(result.get_pixel(3, 3), image.get_pixel(0, 0));
        assert_eq!(result.get_pixel(5, 2), image.get_pixel(4, 0));
        assert_eq!(result.get_pixel(11, 11), image.get_pixel(8, 8));
    }

    #[test]
    fn test_downscale_dimensions() {
        let image = gradient(10, 7);
        let config = PixelateConfig::new()
            .with_block_size(3)
            .with_mode(PixelateMode::Downscale);
        let result = config.apply(&image).unwrap();

        assert_eq!(result.dimensions(), (4, 3));
        assert_eq!(result.get_pixel(3, 2), image.get_pixel(9, 6));
    }

    #[test]
    fn test_downscale_agrees_with_same_size() {
        let image = gradient(19, 11);

        for block_size in 1..6 {
            let same_size = pixelate(&image, block_size).unwrap();
            let downscaled = PixelateConfig::new()
                .with_block_size(block_size)
                .with_mode(PixelateMode::Downscale)
                .apply(&image)
                .unwrap();

            for (x, y, pixel) in downscaled.enumerate_pixels() {
                assert_eq!(pixel, same_size.get_pixel(x * block_size, y * block_size));
            }
        }
    }

    #[test]
    fn test_pixelate_is_idempotent() {
        let image = gradient(21, 14);

        for block_size in 1..7 {
            let once = pixelate(&image, block_size).unwrap();
            let twice = pixelate(&once, block_size).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_resize_formulation_matches_block_loop() {
        let image = gradient(17, 12);

        for block_size in 1..9 {
            let looped = pixelate(&image, block_size).unwrap();
            let resized = pixelate_by_resize(&image, block_size, CanvasFit::Pad).unwrap();
            assert_eq!(looped, resized, "block size {block_size}");
        }
    }

    #[test]
    fn test_stretch_fit() {
        let image = gradient(10, 7);

        for filter in [FilterType::Nearest, FilterType::Triangle] {
            let result = PixelateConfig::new()
                .with_block_size(4)
                .with_fit(CanvasFit::Stretch(filter))
                .apply(&image)
                .unwrap();

            assert_eq!(result.dimensions(), (12, 8));
            assert_uniform_blocks(&result, 4);
        }
    }

    #[test]
    fn test_block_covering_whole_image() {
        let image = gradient(3, 2);
        let result = pixelate(&image, 3).unwrap();

        assert_eq!(result.dimensions(), (3, 3));
        assert!(result.pixels().all(|p| p == image.get_pixel(0, 0)));

        let downscaled = PixelateConfig::new()
            .with_block_size(3)
            .with_mode(PixelateMode::Downscale)
            .apply(&image)
            .unwrap();
        assert_eq!(downscaled.dimensions(), (1, 1));
    }

    #[test]
    fn test_oversized_block_is_rejected() {
        let image = gradient(4, 4);

        for block_size in [5, 50_000, u32::MAX] {
            for mode in [PixelateMode::SameSize, PixelateMode::Downscale] {
                let config = PixelateConfig::new()
                    .with_block_size(block_size)
                    .with_mode(mode);
                assert!(
                    matches!(config.apply(&image), Err(PixelGridError::Validation(_))),
                    "block size {block_size} in {mode:?} mode"
                );
            }

            assert!(matches!(
                pixelate_by_resize(&image, block_size, CanvasFit::Pad),
                Err(PixelGridError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_canvas_size_is_capped() {
        // a 20000 px block fits the long side but pads the strip to 20000x20000
        let strip = RgbImage::from_pixel(1, 20_000, Rgb([1, 2, 3]));
        assert!(matches!(
            pixelate(&strip, 20_000),
            Err(PixelGridError::Validation(_))
        ));
        assert!(matches!(
            pixelate_by_resize(&strip, 20_000, CanvasFit::Stretch(FilterType::Nearest)),
            Err(PixelGridError::Validation(_))
        ));

        let result = pixelate(&strip, 100).unwrap();
        assert_eq!(result.dimensions(), (100, 20_000));
    }

    #[test]
    fn test_invalid_input() {
        let image = gradient(4, 4);
        assert!(matches!(pixelate(&image, 0), Err(PixelGridError::Validation(_))));
        assert!(matches!(
            pixelate(&RgbImage::new(0, 3), 2),
            Err(PixelGridError::Validation(_))
        ));
        assert!(matches!(
            pixelate_by_resize(&image, 0, CanvasFit::Pad),
            Err(PixelGridError::Validation(_))
        ));
    }
}
