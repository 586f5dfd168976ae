/// Block size estimation example
/// Compares the row scan and edge statistics estimators on one image
use pixel_grid::{
    BlockSizeSelector, EdgeStatsEstimator, Estimator, GridEstimator, RowScanEstimator, load_image,
};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let img = load_image(Path::new("data/test.png"))?;

    let estimators = [
        GridEstimator::RowScan(RowScanEstimator::new().with_color_threshold(10.0)),
        GridEstimator::EdgeStats(EdgeStatsEstimator::new()),
    ];

    for estimator in estimators {
        let estimate = estimator.estimate(&img)?;
        println!(
            "{}: {:?} -> block size {}",
            estimator.name(),
            estimate,
            estimate.block_size(BlockSizeSelector::Avg)
        );
    }

    Ok(())
}
