use crate::config::Config;
use anyhow::{Context, Result};
use image::DynamicImage;
use log::{debug, error, info, warn};
use pixel_grid::{Estimate, Estimator, GridEstimator, load_image, save_image, side_by_side};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

const OUTPUT_SUFFIX: &str = "_output";
const EDGES_SUFFIX: &str = "_edges";
const SIDE_BY_SIDE_SUFFIX: &str = "_side_by_side";

/// Where the results for one input are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub output: PathBuf,
    pub edges: PathBuf,
    pub side_by_side: PathBuf,
}

impl OutputPaths {
    /// Derives `<stem>_output.png`, `<stem>_edges.png` and
    /// `<stem>_side_by_side.png` from `input`, placed in `output_dir` or next to
    /// the input.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Self {
            output: dir.join(format!("{stem}{OUTPUT_SUFFIX}.png")),
            edges: dir.join(format!("{stem}{EDGES_SUFFIX}.png")),
            side_by_side: dir.join(format!("{stem}{SIDE_BY_SIDE_SUFFIX}.png")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Processed {
    pub input: PathBuf,
    pub estimate: Estimate,
    pub block_size: u32,
    pub output: PathBuf,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub processed: Vec<Processed>,
    pub failed: Vec<(PathBuf, String)>,
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// True for files this tool wrote on an earlier run
pub fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| {
            [OUTPUT_SUFFIX, EDGES_SUFFIX, SIDE_BY_SIDE_SUFFIX]
                .iter()
                .any(|suffix| stem.ends_with(suffix))
        })
        .unwrap_or(false)
}

/// Expands `inputs` into the list of images to process.
///
/// Directories are scanned (not recursively) for files with an allowed
/// extension, skipping earlier results; files are taken as given. An
/// unreadable directory aborts the run.
pub fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];

    for input in inputs {
        if input.is_dir() {
            let mut found = vec![];
            let entries = fs::read_dir(input)
                .with_context(|| format!("read directory {} failed", input.display()))?;

            for entry in entries {
                let path = entry
                    .with_context(|| format!("read directory {} failed", input.display()))?
                    .path();

                if path.is_file() && is_image_file(&path) && !is_generated(&path) {
                    found.push(path);
                }
            }

            found.sort();
            debug!("found {} image(s) in {}", found.len(), input.display());
            files.extend(found);
        } else if input.is_file() {
            if !is_image_file(input) {
                warn!("{} has no known image extension, trying anyway", input.display());
            }
            files.push(input.clone());
        } else {
            warn!("{} does not exist, skipping", input.display());
        }
    }

    Ok(files)
}

/// Estimates the block size of one image and writes its results
pub fn process_file(path: &Path, config: &Config, output_dir: Option<&Path>) -> Result<Processed> {
    let image = load_image(path)?;
    let outputs = OutputPaths::for_input(path, output_dir);

    let estimate = match config.estimator() {
        GridEstimator::EdgeStats(estimator) if config.output_edges => {
            let (stats, edges) = estimator.estimate_with_edges(&image)?;
            save_image(&DynamicImage::ImageLuma8(edges), &outputs.edges)?;
            info!("Saved edge map {}", outputs.edges.display());
            Estimate::Stats(stats)
        }
        estimator => estimator.estimate(&image)?,
    };

    let block_size = estimate.block_size(config.selector());
    info!(
        "Calculated pixel size for {} is: {} ({:?})",
        path.display(),
        block_size,
        estimate
    );

    let pixelated = config.pixelate_config(block_size).apply(&image)?;

    if config.side_by_side {
        let combined = side_by_side(&image, &pixelated)?;
        save_image(&DynamicImage::ImageRgb8(combined), &outputs.side_by_side)?;
    }

    save_image(&DynamicImage::ImageRgb8(pixelated), &outputs.output)?;
    info!("Processed {} -> {}", path.display(), outputs.output.display());

    Ok(Processed {
        input: path.to_path_buf(),
        estimate,
        block_size,
        output: outputs.output,
    })
}

/// Processes `files` in order; a failing file is logged and skipped
pub fn run(files: &[PathBuf], config: &Config, output_dir: Option<&Path>) -> Summary {
    let mut summary = Summary::default();

    for (index, path) in files.iter().enumerate() {
        debug!("[{}/{}] {}", index + 1, files.len(), path.display());

        match process_file(path, config, output_dir) {
            Ok(processed) => summary.processed.push(processed),
            Err(e) => {
                error!("Skipping {}: {e:#}", path.display());
                summary.failed.push((path.clone(), format!("{e:#}")));
            }
        }
    }

    summary
}
