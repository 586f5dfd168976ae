pub mod color;
pub mod edge_stats;
pub mod estimate;
pub mod io;
pub mod pixelate;
pub mod presenter;
pub mod resample;
pub mod row_scan;

pub use edge_stats::{AveragePolicy, BlockStats, EdgeStatsEstimator, estimate_stats, spacing_stats};
pub use estimate::{BlockSizeSelector, Estimate, clamp_block_size};
pub use io::{load_image, save_image};
pub use pixelate::{CanvasFit, PixelateConfig, PixelateMode, pixelate, pixelate_by_resize};
pub use presenter::side_by_side;
pub use row_scan::{RowScanEstimator, estimate_scalar};

use image::RgbImage;
use std::path::PathBuf;

pub type PixelGridResult<T> = Result<T, PixelGridError>;

#[derive(thiserror::Error, Debug)]
pub enum PixelGridError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid parameter: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Estimates the edge length of one "virtual pixel" in an image.
pub trait Estimator {
    fn estimate(&self, image: &RgbImage) -> PixelGridResult<Estimate>;
}

#[derive(Debug, Clone)]
pub enum GridEstimator {
    RowScan(RowScanEstimator),
    EdgeStats(EdgeStatsEstimator),
}

impl Default for GridEstimator {
    fn default() -> Self {
        GridEstimator::EdgeStats(EdgeStatsEstimator::new())
    }
}

impl GridEstimator {
    pub fn name(&self) -> &'static str {
        match self {
            GridEstimator::RowScan(_) => "row-scan",
            GridEstimator::EdgeStats(_) => "edge-stats",
        }
    }

    /// Checks the parameters without touching an image
    pub fn validate(&self) -> PixelGridResult<()> {
        match self {
            GridEstimator::RowScan(estimator) => estimator.validate(),
            GridEstimator::EdgeStats(estimator) => estimator.validate(),
        }
    }
}

impl Estimator for GridEstimator {
    fn estimate(&self, image: &RgbImage) -> PixelGridResult<Estimate> {
        match self {
            GridEstimator::RowScan(estimator) => estimator.estimate(image),
            GridEstimator::EdgeStats(estimator) => estimator.estimate(image),
        }
    }
}

pub(crate) fn ensure_not_empty(image: &RgbImage) -> PixelGridResult<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PixelGridError::Validation(format!(
            "image must not be empty, got {}x{}",
            image.width(),
            image.height()
        )));
    }

    Ok(())
}

pub(crate) fn ensure_threshold(name: &str, value: f64) -> PixelGridResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PixelGridError::Validation(format!(
            "{name} must be a non-negative finite number, got {value}"
        )));
    }

    Ok(())
}
