//! Output format resolution.
//!
//! The rasterization service supports a small, closed set of output formats.
//! Each format has exactly one canonical file extension and one wire token
//! (the value sent in the request's `output_format` field). Formats are
//! resolved either from a destination path's extension or from an explicit
//! format token supplied by the caller; both paths go through the same
//! lookup table so they can never diverge.

use std::path::Path;

use serde::Serialize;

use crate::error::DownloadError;

// =============================================================================
// ImageFormat
// =============================================================================

/// Canonical output format for a rasterization request.
///
/// The set is closed: the service renders exactly these three formats.
/// Serializes as the service's wire token (`GTiff`, `PNG`, `JPEG`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    /// Tiled GeoTIFF raster.
    #[serde(rename = "GTiff")]
    GeoTiff,

    /// Lossless compressed raster (PNG).
    #[serde(rename = "PNG")]
    Png,

    /// Lossy compressed raster (JPEG).
    #[serde(rename = "JPEG")]
    Jpeg,
}

/// The extension ↔ format table, in the order reported to users.
const FORMATS: [(&str, ImageFormat); 3] = [
    ("tif", ImageFormat::GeoTiff),
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
];

impl ImageFormat {
    /// Canonical file extension for this format, without the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            ImageFormat::GeoTiff => "tif",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Token sent to the service as `output_format`.
    pub const fn wire_token(&self) -> &'static str {
        match self {
            ImageFormat::GeoTiff => "GTiff",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
        }
    }

    /// Resolve a format from an explicit format token (e.g. `"tif"`).
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::UnsupportedFormat`] naming the offending
    /// token and every accepted value.
    pub fn from_name(name: &str) -> Result<Self, DownloadError> {
        lookup(name)
    }

    /// Resolve a format from a destination path's extension.
    ///
    /// The extension is taken without its leading dot and looked up in the
    /// same table as [`ImageFormat::from_name`]. A path with no extension
    /// fails the same way as an unrecognized one.
    pub fn from_path(path: &Path) -> Result<Self, DownloadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        lookup(ext)
    }
}

/// Shared lookup used by both resolution entry points.
fn lookup(key: &str) -> Result<ImageFormat, DownloadError> {
    FORMATS
        .iter()
        .find(|(ext, _)| *ext == key)
        .map(|(_, format)| *format)
        .ok_or_else(|| unsupported(key))
}

/// The single failure constructor shared by both entry points.
fn unsupported(given: &str) -> DownloadError {
    let expected = FORMATS
        .iter()
        .map(|(ext, _)| *ext)
        .collect::<Vec<_>>()
        .join(", ");
    DownloadError::UnsupportedFormat {
        given: given.to_string(),
        expected,
    }
}

// =============================================================================
// Tests
// =============================================================================
