use crate::config::{Average, BlockSizeSetting, Fit, Mode, Strategy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pixelart", version)]
#[command(about = "Estimate the block size of every image in a directory and re-pixelate it")]
pub struct Args {
    /// Directories to scan or image files to process
    #[arg(default_value = ".")]
    pub inputs: Vec<PathBuf>,

    /// Write results here instead of next to each input
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with default parameters
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Block size estimator
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Color distance that ends a block (row-scan)
    #[arg(long, value_name = "FLOAT")]
    pub color_threshold: Option<f64>,

    /// Lower hysteresis threshold (edge-stats)
    #[arg(long, value_name = "FLOAT")]
    pub lower_threshold: Option<f32>,

    /// Upper hysteresis threshold (edge-stats)
    #[arg(long, value_name = "FLOAT")]
    pub upper_threshold: Option<f32>,

    /// avg, max, min or a fixed number of pixels
    #[arg(short, long, value_name = "SELECTOR")]
    pub block_size: Option<BlockSizeSetting>,

    /// Output layout
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// How the image is grown to a multiple of the block size
    #[arg(long, value_enum)]
    pub fit: Option<Fit>,

    /// How the mean edge spacing is rounded
    #[arg(long, value_enum)]
    pub average: Option<Average>,

    /// Also save the edge map as <name>_edges.png
    #[arg(long)]
    pub output_edges: bool,

    /// Also save a side-by-side comparison as <name>_side_by_side.png
    #[arg(long)]
    pub side_by_side: bool,

    /// Prints debug information verbosely
    #[arg(short, long)]
    pub verbose: bool,
}
