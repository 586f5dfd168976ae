use crate::cli::Args;
use anyhow::{Context, Result};
use derivative::Derivative;
use image::imageops::FilterType;
use log::debug;
use pixel_grid::{
    AveragePolicy, BlockSizeSelector, CanvasFit, EdgeStatsEstimator, GridEstimator,
    PixelateConfig, PixelateMode, RowScanEstimator,
};
use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    RowScan,
    EdgeStats,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    SameSize,
    Downscale,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Fit {
    Pad,
    StretchNearest,
    StretchTriangle,
    StretchCatmullRom,
    StretchLanczos3,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Average {
    Truncate,
    Round,
}

/// `avg`, `max`, `min` or a fixed size in pixels
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "RawBlockSize")]
pub enum BlockSizeSetting {
    Avg,
    Max,
    Min,
    Fixed(u32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlockSize {
    Fixed(u32),
    Named(String),
}

impl FromStr for BlockSizeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg" => Ok(BlockSizeSetting::Avg),
            "max" => Ok(BlockSizeSetting::Max),
            "min" => Ok(BlockSizeSetting::Min),
            other => match other.parse::<u32>() {
                Ok(0) => Err("fixed block size must be at least 1".to_string()),
                Ok(size) => Ok(BlockSizeSetting::Fixed(size)),
                Err(_) => Err(format!(
                    "invalid block size `{s}`, expected avg, max, min or a positive integer"
                )),
            },
        }
    }
}

impl TryFrom<RawBlockSize> for BlockSizeSetting {
    type Error = String;

    fn try_from(raw: RawBlockSize) -> Result<Self, Self::Error> {
        match raw {
            RawBlockSize::Fixed(size) => size.to_string().parse(),
            RawBlockSize::Named(name) => name.parse(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "Strategy::EdgeStats"))]
    pub strategy: Strategy,

    #[derivative(Default(value = "85.0"))]
    pub color_threshold: f64,

    #[derivative(Default(value = "50.0"))]
    pub lower_threshold: f32,

    #[derivative(Default(value = "50.0"))]
    pub upper_threshold: f32,

    #[derivative(Default(value = "BlockSizeSetting::Avg"))]
    pub block_size: BlockSizeSetting,

    #[derivative(Default(value = "Mode::SameSize"))]
    pub mode: Mode,

    #[derivative(Default(value = "Fit::Pad"))]
    pub fit: Fit,

    #[derivative(Default(value = "Average::Truncate"))]
    pub average: Average,

    pub output_edges: bool,

    pub side_by_side: bool,
}

impl Config {
    /// Builds the effective configuration
    ///
    /// Starts from the defaults (or the TOML file given with `--config`) and
    /// applies every command line override on top.
    ///
    /// # Returns
    /// - `Result<Config>` with validated parameters
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_args(args);
        config.validate()?;
        debug!("{:?}", config);

        Ok(config)
    }

    /// Loads the configuration from a TOML file
    ///
    /// # Parameters
    /// - `path`: TOML file, keys missing from it keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        toml::from_str::<Config>(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(strategy) = args.strategy {
            self.strategy = strategy;
        }
        if let Some(threshold) = args.color_threshold {
            self.color_threshold = threshold;
        }
        if let Some(threshold) = args.lower_threshold {
            self.lower_threshold = threshold;
        }
        if let Some(threshold) = args.upper_threshold {
            self.upper_threshold = threshold;
        }
        if let Some(block_size) = args.block_size {
            self.block_size = block_size;
        }
        if let Some(mode) = args.mode {
            self.mode = mode;
        }
        if let Some(fit) = args.fit {
            self.fit = fit;
        }
        if let Some(average) = args.average {
            self.average = average;
        }

        self.output_edges |= args.output_edges;
        self.side_by_side |= args.side_by_side;
    }

    /// Rejects parameters that would fail for every file
    ///
    /// Both estimators are checked so a bad threshold in the file is reported
    /// even when the other strategy is selected.
    pub fn validate(&self) -> Result<()> {
        self.row_scan()
            .validate()
            .context("invalid row-scan settings")?;
        self.edge_stats()
            .validate()
            .context("invalid edge-stats settings")?;

        if self.output_edges && self.strategy != Strategy::EdgeStats {
            log::warn!("output_edges only applies to the edge-stats strategy, ignoring it");
        }

        Ok(())
    }

    pub fn estimator(&self) -> GridEstimator {
        match self.strategy {
            Strategy::RowScan => GridEstimator::RowScan(self.row_scan()),
            Strategy::EdgeStats => GridEstimator::EdgeStats(self.edge_stats()),
        }
    }

    fn row_scan(&self) -> RowScanEstimator {
        RowScanEstimator::new().with_color_threshold(self.color_threshold)
    }

    fn edge_stats(&self) -> EdgeStatsEstimator {
        EdgeStatsEstimator::new()
            .with_lower_threshold(self.lower_threshold)
            .with_upper_threshold(self.upper_threshold)
            .with_average(match self.average {
                Average::Truncate => AveragePolicy::Truncate,
                Average::Round => AveragePolicy::Round,
            })
    }

    pub fn selector(&self) -> BlockSizeSelector {
        match self.block_size {
            BlockSizeSetting::Avg => BlockSizeSelector::Avg,
            BlockSizeSetting::Max => BlockSizeSelector::Max,
            BlockSizeSetting::Min => BlockSizeSelector::Min,
            BlockSizeSetting::Fixed(size) => BlockSizeSelector::Fixed(size),
        }
    }

    pub fn pixelate_config(&self, block_size: u32) -> PixelateConfig {
        let mode = match self.mode {
            Mode::SameSize => PixelateMode::SameSize,
            Mode::Downscale => PixelateMode::Downscale,
        };

        let fit = match self.fit {
            Fit::Pad => CanvasFit::Pad,
            Fit::StretchNearest => CanvasFit::Stretch(FilterType::Nearest),
            Fit::StretchTriangle => CanvasFit::Stretch(FilterType::Triangle),
            Fit::StretchCatmullRom => CanvasFit::Stretch(FilterType::CatmullRom),
            Fit::StretchLanczos3 => CanvasFit::Stretch(FilterType::Lanczos3),
        };

        PixelateConfig::new()
            .with_block_size(block_size)
            .with_mode(mode)
            .with_fit(fit)
    }
}
