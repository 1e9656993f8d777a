use std::io::{Cursor, Write};
use std::path::Path;

use filepress_storage::{Storage, StorageError};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, Frame, ImageFormat, ImageReader};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::ProcessingError;
use crate::sniff::SniffedType;

/// Lossy quality used when re-encoding images (0-100)
pub const DEFAULT_IMAGE_QUALITY: u8 = 85;

/// GIF quantizer speed, 1 is slowest and produces the smallest palettes
const GIF_ENCODER_SPEED: i32 = 1;

/// How a sniffed artifact gets compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionStrategy {
    /// Decode and re-encode in the original format
    Image,
    /// Single-entry DEFLATE zip
    Archive,
}

impl CompressionStrategy {
    pub fn select(sniffed: &SniffedType) -> Self {
        if sniffed.is_image() {
            CompressionStrategy::Image
        } else {
            CompressionStrategy::Archive
        }
    }
}

/// Produces compressed bytes for a stored artifact
#[derive(Debug, Clone)]
pub struct Compressor {
    image_quality: u8,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_QUALITY)
    }
}

impl Compressor {
    pub fn new(image_quality: u8) -> Self {
        Self {
            image_quality: image_quality.clamp(1, 100),
        }
    }

    /// Compress the artifact stored under `key`.
    ///
    /// Fails with [`ProcessingError::SourceMissing`] if the artifact is gone by
    /// the time compression starts.
    pub async fn compress(
        &self,
        storage: &dyn Storage,
        key: &str,
        sniffed: &SniffedType,
    ) -> Result<Vec<u8>, ProcessingError> {
        if !storage.exists(key).await? {
            return Err(ProcessingError::SourceMissing(key.to_string()));
        }

        let data = storage.read(key).await.map_err(|e| match e {
            StorageError::NotFound(key) => ProcessingError::SourceMissing(key),
            other => ProcessingError::Storage(other),
        })?;

        let strategy = CompressionStrategy::select(sniffed);
        let quality = self.image_quality;
        let entry_name = archive_entry_name(key);
        let input_size = data.len();
        let start = std::time::Instant::now();

        // Decoding and deflating are CPU-bound; run off the async pool.
        let output = tokio::task::spawn_blocking(move || match strategy {
            CompressionStrategy::Image => recompress_image(&data, quality),
            CompressionStrategy::Archive => archive_single_file(&entry_name, &data),
        })
        .await
        .map_err(|e| ProcessingError::TaskFailed(e.to_string()))??;

        tracing::debug!(
            key = %key,
            mime = %sniffed,
            strategy = ?strategy,
            input_size,
            output_size = output.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Compression finished"
        );

        Ok(output)
    }
}

/// Base name used for the archive entry, never a path.
fn archive_entry_name(key: &str) -> String {
    Path::new(key)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or("file")
        .to_string()
}

/// Re-encode an image in the format it was decoded from.
fn recompress_image(data: &[u8], quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| ProcessingError::Decode("unrecognized image format".to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| ProcessingError::Decode(format!("{:?}: {}", format, e)))?;

    let mut buffer = Vec::new();
    let encoded = match format {
        ImageFormat::Jpeg => {
            let img = if img.color().has_alpha() {
                DynamicImage::ImageRgb8(img.to_rgb8())
            } else {
                img
            };
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            img.write_with_encoder(encoder)
        }
        ImageFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Best,
                FilterType::Adaptive,
            );
            img.write_with_encoder(encoder)
        }
        ImageFormat::Gif => {
            // The encoder writes the trailer on drop, so keep it scoped.
            let mut encoder = GifEncoder::new_with_speed(&mut buffer, GIF_ENCODER_SPEED);
            encoder.encode_frame(Frame::new(img.to_rgba8()))
        }
        other => img.write_to(&mut Cursor::new(&mut buffer), other),
    };
    encoded.map_err(|e| ProcessingError::Encode(format!("{:?}: {}", format, e)))?;

    Ok(buffer)
}

/// Build an in-memory zip holding exactly one DEFLATE entry.
fn archive_single_file(entry_name: &str, data: &[u8]) -> Result<Vec<u8>, ProcessingError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file(entry_name, options)?;
        zip.write_all(data)
            .map_err(|e| ProcessingError::Archive(format!("Failed to write {}: {}", entry_name, e)))?;
        zip.finish()?;
    }

    Ok(buffer)
}
