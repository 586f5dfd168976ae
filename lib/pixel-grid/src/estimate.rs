use crate::BlockStats;

/// Raw output of an [`Estimator`](crate::Estimator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    Scalar(u32),
    Stats(BlockStats),
}

/// Which value of an estimate is handed to the pixelator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSizeSelector {
    #[default]
    Avg,
    Max,
    Min,
    Fixed(u32),
}

impl Estimate {
    /// The unclamped value picked by `selector`, may be 0
    pub fn raw(&self, selector: BlockSizeSelector) -> u32 {
        match (selector, self) {
            (BlockSizeSelector::Fixed(size), _) => size,
            (_, Estimate::Scalar(size)) => *size,
            (BlockSizeSelector::Avg, Estimate::Stats(stats)) => stats.avg,
            (BlockSizeSelector::Max, Estimate::Stats(stats)) => stats.max,
            (BlockSizeSelector::Min, Estimate::Stats(stats)) => stats.min,
        }
    }

    /// A block size that is safe to divide by
    pub fn block_size(&self, selector: BlockSizeSelector) -> u32 {
        if let Estimate::Stats(stats) = self
            && stats.is_degenerate()
            && !matches!(selector, BlockSizeSelector::Fixed(_))
        {
            log::debug!("no row or column of the edge map holds two edges");
        }

        clamp_block_size(self.raw(selector))
    }
}

/// Clamps a degenerate block size of 0 up to 1
pub fn clamp_block_size(size: u32) -> u32 {
    if size == 0 {
        log::warn!("estimated block size is 0 (no boundaries found), falling back to 1");
        return 1;
    }

    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_on_stats() {
        let estimate = Estimate::Stats(BlockStats { avg: 6, max: 9, min: 3 });

        assert_eq!(estimate.block_size(BlockSizeSelector::Avg), 6);
        assert_eq!(estimate.block_size(BlockSizeSelector::Max), 9);
        assert_eq!(estimate.block_size(BlockSizeSelector::Min), 3);
        assert_eq!(estimate.block_size(BlockSizeSelector::Fixed(4)), 4);
    }

    #[test]
    fn test_selector_on_scalar() {
        let estimate = Estimate::Scalar(7);

        assert_eq!(estimate.block_size(BlockSizeSelector::Avg), 7);
        assert_eq!(estimate.block_size(BlockSizeSelector::Min), 7);
        assert_eq!(estimate.block_size(BlockSizeSelector::Fixed(2)), 2);
    }

    #[test]
    fn test_degenerate_estimate_is_clamped() {
        let estimate = Estimate::Stats(BlockStats::default());

        assert_eq!(estimate.raw(BlockSizeSelector::Avg), 0);
        for selector in [
            BlockSizeSelector::Avg,
            BlockSizeSelector::Max,
            BlockSizeSelector::Min,
            BlockSizeSelector::Fixed(0),
        ] {
            assert_eq!(estimate.block_size(selector), 1);
        }
        assert_eq!(estimate.block_size(BlockSizeSelector::Fixed(3)), 3);
    }
}
