//! Rasterization service clients.
//!
//! [`RasterClient`] is the seam between the download pipeline and the remote
//! rasterization service; [`HttpRasterClient`] is the HTTP implementation.
//! The trait makes the pipeline testable with mock clients and keeps the
//! transport swappable.

mod http;

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{DownloadError, ServiceError};
use crate::request::RasterRequest;

pub use http::HttpRasterClient;

// =============================================================================
// RasterClient
// =============================================================================

/// A client for the remote rasterization service.
///
/// Implementations issue exactly one service call per invocation and perform
/// no retry; retry and backoff policy, if wanted, belongs to the caller.
pub trait RasterClient {
    /// Rasterize the request's inputs into encoded image bytes.
    fn raster(&self, request: &RasterRequest) -> Result<RasterResult, ServiceError>;
}

// =============================================================================
// RasterResult
// =============================================================================

/// Successful response from a raster call.
#[derive(Debug, Clone, Default)]
pub struct RasterResult {
    /// Mapping from service-generated filename to encoded image bytes.
    ///
    /// Ordered so that multi-file diagnostics are deterministic.
    pub files: BTreeMap<String, Bytes>,
}

impl RasterResult {
    /// Extract the single artifact a raster call must produce.
    ///
    /// A single raster call yields exactly one output file; zero or multiple
    /// entries indicate a service contract violation and are rejected before
    /// any write is attempted.
    ///
    /// # Errors
    ///
    /// * [`DownloadError::EmptyResult`] - the file mapping has no entries
    /// * [`DownloadError::MultipleResults`] - more than one entry, naming
    ///   every returned filename
    pub fn into_single_file(self) -> Result<Bytes, DownloadError> {
        let mut files = self.files.into_iter();
        match (files.next(), files.next()) {
            (None, _) => Err(DownloadError::EmptyResult),
            (Some((_, bytes)), None) => Ok(bytes),
            (Some((first, _)), Some((second, _))) => {
                let mut names = vec![first, second];
                names.extend(files.map(|(name, _)| name));
                Err(DownloadError::MultipleResults(names))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
