//! Caller-supplied rasterization context.

use serde_json::{Map, Value};

/// Read-only source of derived rasterization parameters.
///
/// A context is owned by the caller (typically a geospatial
/// bounds/resolution/projection object) and exposes its parameters as a JSON
/// mapping that is merged into each raster request. The pipeline never
/// mutates the context.
///
/// Builder-owned request fields (`inputs`, `bands`, `scales`, `data_type`,
/// `output_format`, `save`) can never be overridden through a context; see
/// [`build_request`](crate::request::build_request).
pub trait RasterContext {
    /// Derived rasterization parameters (resolution, bounds, projection, ...).
    fn raster_params(&self) -> Map<String, Value>;
}

/// A plain JSON mapping is itself a valid context.
impl RasterContext for Map<String, Value> {
    fn raster_params(&self) -> Map<String, Value> {
        self.clone()
    }
}
