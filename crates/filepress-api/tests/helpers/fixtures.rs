//! Test fixtures: small encoded images and archive readers.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::{Cursor, Read};

/// Encode a gradient image of the given size in `format`.
pub fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture image");
    buffer
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    create_test_image(width, height, ImageFormat::Png)
}

/// Header of a PE executable padded with zeroes.
pub fn create_fake_executable() -> Vec<u8> {
    let mut exe = b"MZ\x90\x00\x03\x00\x00\x00\x04\x00\x00\x00\xff\xff".to_vec();
    exe.resize(256, 0);
    exe
}

/// Read the only entry of a zip archive as (name, bytes).
pub fn read_single_entry(archive: &[u8]) -> (String, Vec<u8>) {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).expect("Not a zip archive");
    assert_eq!(zip.len(), 1, "archive should hold exactly one entry");
    let mut entry = zip.by_index(0).expect("Missing archive entry");
    let mut content = Vec::new();
    entry
        .read_to_end(&mut content)
        .expect("Failed to read archive entry");
    (entry.name().to_string(), content)
}
