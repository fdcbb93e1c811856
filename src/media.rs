use std::io::Cursor;

use anyhow::{anyhow, Context as _, Result};
use image::ImageFormat;

use crate::error::UserError;

/// Re-encodes any supported image (PNG, JPEG, WebP, ...) as a single-frame
/// GIF. Decode failures are user errors since they mean the uploaded file
/// wasn't an image.
pub fn to_gif(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).context(UserError(anyhow!(
        "The provided file doesn't look like a supported image"
    )))?;

    let mut gif_bytes = Cursor::new(Vec::new());
    decoded
        .write_to(&mut gif_bytes, ImageFormat::Gif)
        .context("Failed to encode the image as a GIF")?;

    Ok(gif_bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn png_fixture() -> Vec<u8> {
        let mut img = RgbaImage::new(4, 4);
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 2, Rgba([0, 0, 255, 128]));

        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn png_converts_to_gif() {
        let gif = to_gif(&png_fixture()).unwrap();

        assert_eq!(image::guess_format(&gif).unwrap(), ImageFormat::Gif);

        let decoded = image::load_from_memory(&gif).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn garbage_input_is_a_user_error() {
        let err = to_gif(b"not an image at all").unwrap_err();

        assert!(err.is::<UserError>());
    }
}
