//! HTTP implementation of [`RasterClient`].

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::error::ServiceError;
use crate::request::RasterRequest;

use super::{RasterClient, RasterResult};

/// JSON body of a successful raster response.
///
/// File contents come over the wire base64-encoded.
#[derive(Debug, Deserialize)]
struct RasterResponseBody {
    files: BTreeMap<String, String>,
}

/// HTTP client for the rasterization service.
///
/// Posts the JSON-serialized request to `{endpoint}/raster` and decodes the
/// response's base64 file payloads. Each call maps to exactly one HTTP
/// request; there is no retry.
///
/// # Example
///
/// ```ignore
/// use raster_fetch::HttpRasterClient;
///
/// let client = HttpRasterClient::new("https://raster.example.com")?;
/// let result = client.raster(&request)?;
/// ```
#[derive(Debug)]
pub struct HttpRasterClient {
    client: reqwest::blocking::Client,
    raster_url: Url,
}

impl HttpRasterClient {
    /// Create a client for the given service endpoint.
    ///
    /// The pipeline imposes no deadline of its own; use
    /// [`HttpRasterClient::with_timeout`] to bound the call.
    pub fn new(endpoint: &str) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ServiceError::Connection(format!("failed to create HTTP client: {}", e)))?;
        Self::from_parts(client, endpoint)
    }

    /// Create a client with a per-request timeout.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Connection(format!("failed to create HTTP client: {}", e)))?;
        Self::from_parts(client, endpoint)
    }

    fn from_parts(client: reqwest::blocking::Client, endpoint: &str) -> Result<Self, ServiceError> {
        // Normalize so join() appends rather than replaces the last segment.
        let base = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };
        let raster_url = Url::parse(&base)
            .and_then(|url| url.join("raster"))
            .map_err(|e| ServiceError::Connection(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        Ok(Self { client, raster_url })
    }
}

impl RasterClient for HttpRasterClient {
    fn raster(&self, request: &RasterRequest) -> Result<RasterResult, ServiceError> {
        tracing::debug!(url = %self.raster_url, inputs = request.inputs.len(), "posting raster request");

        let response = self
            .client
            .post(self.raster_url.clone())
            .json(request)
            .send()
            .map_err(|e| ServiceError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::NotFound(body));
        }
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::BadRequest(body));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Unexpected(format!("HTTP {}: {}", status, body)));
        }

        let body: RasterResponseBody = response
            .json()
            .map_err(|e| ServiceError::Unexpected(format!("invalid response body: {}", e)))?;

        decode_files(body)
    }
}

/// Decode the base64 file payloads of a response body.
fn decode_files(body: RasterResponseBody) -> Result<RasterResult, ServiceError> {
    let mut files = BTreeMap::new();
    for (name, encoded) in body.files {
        let bytes = BASE64.decode(&encoded).map_err(|e| {
            ServiceError::Unexpected(format!("invalid base64 payload for '{}': {}", name, e))
        })?;
        files.insert(name, Bytes::from(bytes));
    }
    Ok(RasterResult { files })
}
