use crate::{PixelGridError, PixelGridResult};
use image::{
    DynamicImage, ImageFormat, RgbImage,
    codecs::jpeg::JpegEncoder,
};
use std::{fs::File, io::BufWriter, path::Path};

/// Decodes any supported raster file into 8-bit RGB
pub fn load_image(path: impl AsRef<Path>) -> PixelGridResult<RgbImage> {
    let path = path.as_ref();
    let decode_err = |source| PixelGridError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(decode_err)?;

    Ok(image.to_rgb8())
}

/// Saves `image` with the format implied by the extension of `path`.
///
/// JPEG is written at quality 100; PNG and WebP are lossless.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> PixelGridResult<()> {
    let path = path.as_ref();
    let encode_err = |source| PixelGridError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(encode_err)?;

    match format {
        ImageFormat::Jpeg => {
            let writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(writer, 100);
            image.to_rgb8().write_with_encoder(encoder).map_err(encode_err)?;
        }
        _ => image.save_with_format(path, format).map_err(encode_err)?,
    }

    log::debug!("saved {}", path.display());
    Ok(())
}
