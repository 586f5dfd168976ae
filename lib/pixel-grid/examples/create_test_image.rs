use image::{Rgb, RgbImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("data")?;

    // 640x480 pixel-art style image: 16px blocks of a coarse color gradient
    let block = 16;
    let img = RgbImage::from_fn(640, 480, |x, y| {
        let (bx, by) = (x / block, y / block);
        let r = (bx * 255 / 40) as u8;
        let g = (by * 255 / 30) as u8;
        let b = ((bx + by) * 255 / 70) as u8;
        Rgb([r, g, b])
    });

    img.save("data/test.png")?;
    println!("Created data/test.png");
    Ok(())
}
