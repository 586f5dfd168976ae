use crate::{
    Estimate, Estimator, PixelGridError, PixelGridResult, ensure_not_empty, ensure_threshold,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, RgbImage};

/// How the mean edge spacing is turned into an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AveragePolicy {
    /// Integer division, rounds toward zero
    #[default]
    Truncate,
    /// Round half away from zero
    Round,
}

/// Spacing statistics between neighbouring edge pixels.
///
/// All zero when the edge map had no pair of edges on any row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockStats {
    pub avg: u32,
    pub max: u32,
    pub min: u32,
}

impl BlockStats {
    pub fn is_degenerate(&self) -> bool {
        self.max == 0
    }
}

/// Edge-spacing statistics over the whole image.
///
/// The image is reduced to intensity, run through Canny with the given
/// hysteresis thresholds, and the gaps between consecutive edge pixels on
/// every row and every column are pooled into one distribution.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EdgeStatsEstimator {
    #[derivative(Default(value = "50.0"))]
    pub lower_threshold: f32,

    #[derivative(Default(value = "50.0"))]
    pub upper_threshold: f32,

    #[derivative(Default(value = "AveragePolicy::Truncate"))]
    pub average: AveragePolicy,
}

impl EdgeStatsEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> PixelGridResult<()> {
        ensure_threshold("lower_threshold", self.lower_threshold as f64)?;
        ensure_threshold("upper_threshold", self.upper_threshold as f64)?;

        if self.lower_threshold > self.upper_threshold {
            return Err(PixelGridError::Validation(format!(
                "lower_threshold ({}) must not exceed upper_threshold ({})",
                self.lower_threshold, self.upper_threshold
            )));
        }

        Ok(())
    }

    /// Binary edge map, 255 on edges and 0 elsewhere
    pub fn edge_map(&self, image: &RgbImage) -> PixelGridResult<GrayImage> {
        ensure_not_empty(image)?;
        self.validate()?;

        let gray = image::imageops::grayscale(image);
        Ok(imageproc::edges::canny(
            &gray,
            self.lower_threshold,
            self.upper_threshold,
        ))
    }

    /// Statistics together with the edge map they were computed from
    pub fn estimate_with_edges(&self, image: &RgbImage) -> PixelGridResult<(BlockStats, GrayImage)> {
        let edges = self.edge_map(image)?;
        let stats = spacing_stats(&edges, self.average);

        log::debug!(
            "edge stats: avg = {}, max = {}, min = {}",
            stats.avg,
            stats.max,
            stats.min
        );

        Ok((stats, edges))
    }
}

impl Estimator for EdgeStatsEstimator {
    fn estimate(&self, image: &RgbImage) -> PixelGridResult<Estimate> {
        self.estimate_with_edges(image)
            .map(|(stats, _)| Estimate::Stats(stats))
    }
}

/// Edge-spacing statistics with the default (truncating) average
pub fn estimate_stats(
    image: &RgbImage,
    lower_threshold: f32,
    upper_threshold: f32,
) -> PixelGridResult<BlockStats> {
    EdgeStatsEstimator::new()
        .with_lower_threshold(lower_threshold)
        .with_upper_threshold(upper_threshold)
        .estimate_with_edges(image)
        .map(|(stats, _)| stats)
}

/// Pools the gaps between consecutive edge pixels of every row and every
/// column of `edges` (any non-zero value counts as an edge).
pub fn spacing_stats(edges: &GrayImage, policy: AveragePolicy) -> BlockStats {
    let (width, height) = edges.dimensions();
    let mut gaps = Vec::new();

    for y in 0..height {
        collect_gaps((0..width).map(|x| edges.get_pixel(x, y)[0]), &mut gaps);
    }

    for x in 0..width {
        collect_gaps((0..height).map(|y| edges.get_pixel(x, y)[0]), &mut gaps);
    }

    if gaps.is_empty() {
        return BlockStats::default();
    }

    let sum: u64 = gaps.iter().map(|&gap| gap as u64).sum();
    let count = gaps.len() as u64;

    let avg = match policy {
        AveragePolicy::Truncate => sum / count,
        AveragePolicy::Round => (sum as f64 / count as f64).round() as u64,
    };

    BlockStats {
        avg: avg as u32,
        max: gaps.iter().copied().max().unwrap_or(0),
        min: gaps.iter().copied().min().unwrap_or(0),
    }
}

fn collect_gaps(line: impl Iterator<Item = u8>, gaps: &mut Vec<u32>) {
    let mut previous: Option<u32> = None;

    for (index, value) in line.enumerate() {
        if value == 0 {
            continue;
        }

        let index = index as u32;
        if let Some(previous) = previous {
            gaps.push(index - previous);
        }
        previous = Some(index);
    }
}
