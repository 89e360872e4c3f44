//! # Raster Fetch
//!
//! A download pipeline for remote rasterization services.
//!
//! This library turns a set of remote raster-image identifiers plus
//! band/format selections into a single persisted image artifact — a local
//! file or a caller-supplied writable stream. It resolves ambiguous inputs
//! (implicit output format, implicit filename, path vs. stream destination)
//! into one well-formed service request, validates the response shape, and
//! writes the result durably or raises a precise, actionable error.
//!
//! ## Architecture
//!
//! - [`mod@format`] - extension/token → canonical output format resolution
//! - [`destination`] - path vs. stream destinations, default naming, writing
//! - [`context`] - caller-owned rasterization parameter source
//! - [`request`] - request payload construction
//! - [`client`] - the service trait, HTTP client, and response validation
//! - [`download`](mod@download) - the end-to-end pipeline
//!
//! The pipeline is synchronous and single-threaded per invocation. It never
//! retries, never caches, and never interprets pixel data; rasterization
//! itself is the remote service's job.
//!
//! ## Example
//!
//! ```rust,no_run
//! use raster_fetch::{download, HttpRasterClient};
//! use serde_json::{json, Map};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpRasterClient::new("https://raster.example.com/api/v2")?;
//!
//! let mut ctx = Map::new();
//! ctx.insert("resolution".to_string(), json!(30.0));
//! ctx.insert("srs".to_string(), json!("EPSG:32615"));
//!
//! // No destination given: writes "sceneA-red-green-blue.tif" and
//! // returns the path.
//! let inputs = vec!["sceneA".to_string()];
//! let bands = vec!["red".to_string(), "green".to_string(), "blue".to_string()];
//! let path = download(&inputs, &bands, &ctx, "UInt16", None, Some("tif"), &client)?;
//! println!("saved to {:?}", path);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod destination;
pub mod download;
pub mod error;
pub mod format;
pub mod request;

// Re-export commonly used types
pub use client::{HttpRasterClient, RasterClient, RasterResult};
pub use context::RasterContext;
pub use destination::{default_filename, Destination};
pub use download::{download, DEFAULT_FORMAT};
pub use error::{DownloadError, ServiceError};
pub use format::ImageFormat;
pub use request::{build_request, RasterRequest};
