use anyhow::{Context, Result};
use clap::Parser;
use pixelart::{batch, cli::Args, config::Config};

fn main() -> Result<()> {
    let args = Args::parse();
    pixelart::init_logger(args.verbose);

    let config = Config::resolve(&args)?;
    let files = batch::collect_images(&args.inputs)?;

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {} failed", dir.display()))?;
    }

    if files.is_empty() {
        log::warn!("No image files found");
        return Ok(());
    }

    log::info!(
        "Processing {} image(s) with the {} estimator",
        files.len(),
        config.estimator().name()
    );

    let summary = batch::run(&files, &config, args.output_dir.as_deref());

    log::info!(
        "Done: {} processed, {} failed",
        summary.processed.len(),
        summary.failed.len()
    );

    for (path, reason) in &summary.failed {
        log::warn!("Failed {}: {}", path.display(), reason);
    }

    Ok(())
}
