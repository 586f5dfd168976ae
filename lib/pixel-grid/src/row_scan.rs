use crate::{
    Estimate, Estimator, PixelGridResult, color::exceeds_threshold, ensure_not_empty,
    ensure_threshold,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;

/// Top-row color scan.
///
/// Walks the first row from the left and reports the first column whose color
/// differs from pixel (0, 0) by more than `color_threshold`. Fast, but only as
/// good as the top row is representative of the image.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct RowScanEstimator {
    #[derivative(Default(value = "85.0"))]
    pub color_threshold: f64,
}

impl RowScanEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> PixelGridResult<()> {
        ensure_threshold("color_threshold", self.color_threshold)
    }
}

impl Estimator for RowScanEstimator {
    fn estimate(&self, image: &RgbImage) -> PixelGridResult<Estimate> {
        estimate_scalar(image, self.color_threshold).map(Estimate::Scalar)
    }
}

/// Returns the first x on row 0 whose color crosses `color_threshold`, or 1
/// when the whole row stays within it.
pub fn estimate_scalar(image: &RgbImage, color_threshold: f64) -> PixelGridResult<u32> {
    ensure_not_empty(image)?;
    RowScanEstimator::new()
        .with_color_threshold(color_threshold)
        .validate()?;

    let reference = image.get_pixel(0, 0);

    for x in 1..image.width() {
        if exceeds_threshold(image.get_pixel(x, 0), reference, color_threshold) {
            log::debug!("row scan found a color boundary at x = {x}");
            return Ok(x);
        }
    }

    log::debug!("row scan found no color boundary on the top row");
    Ok(1)
}
