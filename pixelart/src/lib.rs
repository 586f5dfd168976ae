//! Batch pixel-art converter
//!
//! Scans directories for raster images, estimates the block size of each one
//! and writes a re-pixelated copy next to it (or into an output directory).
//!
//! # Architecture
//! - `cli`: command line arguments
//! - `config`: parameters, loaded from an optional TOML file and overridden by the CLI
//! - `batch`: file discovery and the per-file pipeline
//! - Logging setup shared by the binary

pub mod batch;
pub mod cli;
pub mod config;

/// Initializes the logger.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. `RUST_LOG` takes precedence over the `verbose` default.
pub fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
