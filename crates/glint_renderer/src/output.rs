//! Image sinks: plain-text PPM and PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::pixel_count;
use crate::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Expected {expected} pixels for the image size, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

fn check_pixel_count(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<(), OutputError> {
    let expected = pixel_count(width, height);
    if pixels.len() != expected {
        return Err(OutputError::PixelCount {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Write pixels as an ASCII PPM (`P3`) image, top row first.
pub fn write_ppm<W: Write>(
    mut writer: W,
    width: u32,
    height: u32,
    pixels: &[[u8; 3]],
) -> Result<(), OutputError> {
    check_pixel_count(width, height, pixels)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save an image as PPM.
pub fn save_ppm(path: impl AsRef<Path>, image: &ImageBuffer) -> Result<(), OutputError> {
    let writer = BufWriter::new(File::create(path)?);
    write_ppm(writer, image.width, image.height, &image.pixels)
}

/// Save an image as PNG.
pub fn save_png(path: impl AsRef<Path>, image: &ImageBuffer) -> Result<(), OutputError> {
    check_pixel_count(image.width, image.height, &image.pixels)?;

    let bytes: Vec<u8> = bytemuck::cast_slice(&image.pixels).to_vec();
    let actual = image.pixels.len();
    let rgb = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(
        OutputError::PixelCount {
            expected: pixel_count(image.width, image.height),
            actual,
        },
    )?;

    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
pub fn save_image(path: impl AsRef<Path>, image: &ImageBuffer) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(path, image)?,
        "png" => save_png(path, image)?,
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_black_pixel() {
        let mut out = Vec::new();
        write_ppm(&mut out, 1, 1, &[[0, 0, 0]]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P3\n1 1\n255\n0 0 0\n");
    }

    #[test]
    fn test_pixels_written_in_order() {
        let mut out = Vec::new();
        let pixels = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [12, 34, 56]];
        write_ppm(&mut out, 2, 2, &pixels).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n12 34 56\n"
        );
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let mut out = Vec::new();
        let err = write_ppm(&mut out, 2, 2, &[[0, 0, 0]]).unwrap_err();
        assert!(matches!(
            err,
            OutputError::PixelCount {
                expected: 4,
                actual: 1
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let image = ImageBuffer::new(1, 1);
        let err = save_image("render.bmp", &image).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(ext) if ext == "bmp"));
    }

    #[test]
    fn test_pixels_flatten_to_rgb_bytes() {
        let pixels = [[1u8, 2, 3], [4, 5, 6]];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }
}
