//! Helpers shared by the unit tests.

use std::path::{Path, PathBuf};

pub use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
pub use tempfile::tempdir;

/// Writes a `width`x`height` RGB gradient to `dir/name`, encoded by extension.
pub fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 20) as u8, (y * 20) as u8, ((x + y) * 10) as u8])
    });
    let path = dir.join(name);
    image.save(&path).expect("Failed to write test image");
    path
}

/// Writes a half-transparent RGBA image to `dir/name`.
pub fn write_rgba(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7) as u8, (y * 7) as u8, 200, if x % 2 == 0 { 255 } else { 128 }])
    });
    let path = dir.join(name);
    image.save(&path).expect("Failed to write test image");
    path
}

/// Decodes `path`, guessing the format from its content.
pub fn decode(path: &Path) -> (Option<ImageFormat>, DynamicImage) {
    let reader = image::ImageReader::open(path)
        .expect("Failed to open output")
        .with_guessed_format()
        .expect("Failed to read output header");
    let format = reader.format();
    let image = reader.decode().expect("Failed to decode output");
    (format, image)
}

/// Names of every entry in `dir`, sorted.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
