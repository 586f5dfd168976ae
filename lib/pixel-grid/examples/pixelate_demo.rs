/// Pixelate example
/// Demonstrates different block sizes in both output modes
use image::DynamicImage;
use pixel_grid::{PixelateConfig, PixelateMode, load_image, save_image, side_by_side};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = load_image(Path::new("data/test.png"))?;

    let block_sizes = [4, 8, 12, 16, 20, 30];

    for block_size in block_sizes {
        for mode in [PixelateMode::SameSize, PixelateMode::Downscale] {
            let config = PixelateConfig::new()
                .with_block_size(block_size)
                .with_mode(mode);
            let result = config.apply(&img)?;

            let filename = format!("pixelate_{:?}_b{}.png", mode, block_size).to_lowercase();
            save_image(&DynamicImage::ImageRgb8(result), output_dir.join(&filename))?;
            println!("✓ Generated {}", filename);
        }
    }

    let pixelated = PixelateConfig::new().with_block_size(8).apply(&img)?;
    let combined = side_by_side(&img, &pixelated)?;
    save_image(&DynamicImage::ImageRgb8(combined), output_dir.join("side_by_side.png"))?;

    println!("\n✓ All pixelate results generated successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
