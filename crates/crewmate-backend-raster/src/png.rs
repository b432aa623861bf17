//! Deterministic PNG writer.
//!
//! Fixed compression and filter settings give byte-identical files for
//! identical surfaces, so a baked sheet can be identified by its hash.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::surface::Surface;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export settings.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smallest files, slowest encode.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Fastest encode, larger files.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Writes a surface to a PNG file.
pub fn write_surface(surface: &Surface, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_surface_to_writer(surface, writer, config)
}

/// Writes a surface as 8-bit RGBA PNG to any writer.
pub fn write_surface_to_writer<W: Write>(
    surface: &Surface,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if surface.width == 0 || surface.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} surface",
            surface.width, surface.height
        )));
    }

    let mut encoder = Encoder::new(writer, surface.width, surface.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // No time chunk is written, so output depends on pixels alone.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&surface.to_rgba8())?;

    Ok(())
}

/// BLAKE3 hash of encoded PNG bytes.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encodes to memory and returns the bytes with their hash.
pub fn encode_with_hash(
    surface: &Surface,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_surface_to_writer(surface, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn gradient_surface() -> Surface {
        let mut surface = Surface::new(16, 8);
        for y in 0..8 {
            for x in 0..16 {
                surface.set(x, y, Color::rgba(x as f64 / 15.0, y as f64 / 7.0, 0.5, 0.75));
            }
        }
        surface
    }

    #[test]
    fn test_encode_is_deterministic() {
        let surface = gradient_surface();
        let (a, hash_a) = encode_with_hash(&surface, &PngConfig::default()).unwrap();
        let (b, hash_b) = encode_with_hash(&surface, &PngConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_a, hash_b);
        assert_eq!(hash_a.len(), 64);
    }

    #[test]
    fn test_png_signature() {
        let (data, _) = encode_with_hash(&gradient_surface(), &PngConfig::fast()).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let result = encode_with_hash(&Surface::new(0, 4), &PngConfig::default());
        assert!(matches!(result, Err(PngError::InvalidDimensions(_))));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_surface(&gradient_surface(), &path, &PngConfig::best_compression()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}
