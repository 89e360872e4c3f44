//! Download destinations: filesystem paths and caller-supplied streams.
//!
//! A destination is an explicit tagged sum type rather than a runtime type
//! check, so the two write paths stay exhaustive and statically checkable.
//! The default naming policy for absent destinations also lives here.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::error::DownloadError;
use crate::format::ImageFormat;

// =============================================================================
// Destination
// =============================================================================

/// Where a downloaded artifact should be persisted.
///
/// Either a filesystem path (which may not exist yet) or a writable stream
/// the caller has already opened. The pipeline never closes a caller-supplied
/// stream beyond the single write it performs.
pub enum Destination<'a> {
    /// A filesystem location; missing parent directories are created on write.
    Path(PathBuf),

    /// An already-open writable stream owned by the caller.
    Stream(&'a mut dyn Write),
}

impl<'a> Destination<'a> {
    /// Create a path destination.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Destination::Path(path.into())
    }

    /// Create a stream destination from any writer.
    pub fn stream(writer: &'a mut dyn Write) -> Self {
        Destination::Stream(writer)
    }

    /// Whether this destination is a filesystem path.
    ///
    /// Total and binary: every destination is either path-like or a stream.
    pub fn is_path_like(&self) -> bool {
        matches!(self, Destination::Path(_))
    }

    /// Persist the artifact bytes to this destination.
    ///
    /// For a path destination this creates the containing directory chain if
    /// it is non-empty and missing, writes all bytes, and returns the path
    /// used. The file handle is scoped to this call and closed on every exit
    /// path. For a stream destination the bytes are written and flushed, and
    /// `None` is returned since the caller already owns the stream.
    ///
    /// # Errors
    ///
    /// * [`DownloadError::Io`] - directory creation or the file write failed
    /// * [`DownloadError::DestinationWrite`] - the stream write failed; wraps
    ///   the underlying cause so callers never need the stream's own error
    ///   vocabulary
    pub fn write(self, bytes: &[u8]) -> Result<Option<PathBuf>, DownloadError> {
        match self {
            Destination::Path(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                }
                let mut file = File::create(&path)?;
                file.write_all(bytes)?;
                tracing::debug!(path = %path.display(), len = bytes.len(), "wrote artifact");
                Ok(Some(path))
            }
            Destination::Stream(writer) => {
                writer
                    .write_all(bytes)
                    .and_then(|_| writer.flush())
                    .map_err(|source| DownloadError::DestinationWrite { source })?;
                tracing::debug!(len = bytes.len(), "wrote artifact to stream");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Destination::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

// =============================================================================
// Default Naming Policy
// =============================================================================

/// Synthesize a filename when the caller supplied no destination.
///
/// Band tokens are joined with hyphens. A single input yields
/// `"{id}-{bands}.{ext}"`; multiple inputs yield `"mosaic-{bands}.{ext}"`,
/// since a mosaic combines many inputs and an id-per-file name would be
/// ambiguous. The extension is the canonical one for `format`.
///
/// # Errors
///
/// Returns [`DownloadError::NoInputs`] if `inputs` is empty — there is
/// nothing meaningful to name.
pub fn default_filename(
    inputs: &[String],
    bands: &[String],
    format: ImageFormat,
) -> Result<String, DownloadError> {
    if inputs.is_empty() {
        return Err(DownloadError::NoInputs);
    }

    let bands = bands.join("-");
    let name = if inputs.len() == 1 {
        format!("{}-{}.{}", inputs[0], bands, format.extension())
    } else {
        format!("mosaic-{}.{}", bands, format.extension())
    };
    Ok(name)
}

// =============================================================================
// Tests
// =============================================================================
