//! Raster request construction.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::RasterContext;
use crate::format::ImageFormat;

/// Request field names owned by the builder.
///
/// A context cannot override any of these; colliding keys from
/// [`RasterContext::raster_params`] are dropped.
const RESERVED_FIELDS: [&str; 6] = [
    "inputs",
    "bands",
    "scales",
    "data_type",
    "output_format",
    "save",
];

// =============================================================================
// RasterRequest
// =============================================================================

/// The fully merged payload for one raster call.
///
/// Invariants: exactly one `output_format`, `scales` always absent (no
/// per-band rescaling), `save` always false — persisting the artifact is the
/// pipeline's own responsibility, not the service's.
#[derive(Debug, Clone, Serialize)]
pub struct RasterRequest {
    /// Ordered input image identifiers.
    pub inputs: Vec<String>,

    /// Ordered band names; the caller is responsible for matching the band
    /// count to the requested data type.
    pub bands: Vec<String>,

    /// Per-band rescaling. Always `None`: the pipeline never rescales.
    pub scales: Option<Vec<Value>>,

    /// Output pixel data type token (e.g. `"UInt16"`).
    pub data_type: String,

    /// Canonical output format.
    pub output_format: ImageFormat,

    /// Whether the service should persist the result itself. Always false.
    pub save: bool,

    /// Context-derived rasterization parameters (resolution, bounds,
    /// projection, ...), merged into the payload at the top level.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Merge inputs, bands, data type, format, and context-derived parameters
/// into one request payload.
///
/// Performs no I/O and cannot fail; all inputs must already be validated by
/// the caller. Context keys that collide with builder-owned fields are
/// dropped with a warning.
pub fn build_request<C: RasterContext>(
    inputs: &[String],
    bands: &[String],
    ctx: &C,
    data_type: &str,
    output_format: ImageFormat,
) -> RasterRequest {
    let mut extra = Map::new();
    for (key, value) in ctx.raster_params() {
        if RESERVED_FIELDS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "context key collides with a request field, dropping");
            continue;
        }
        extra.insert(key, value);
    }

    RasterRequest {
        inputs: inputs.to_vec(),
        bands: bands.to_vec(),
        scales: None,
        data_type: data_type.to_string(),
        output_format,
        save: false,
        extra,
    }
}

impl RasterRequest {
    /// Pretty-printed JSON dump of the payload, used in request-rejection
    /// error messages.
    pub fn dump(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("<unserializable request: {}>", e))
    }
}

// =============================================================================
// Tests
// =============================================================================
