//! The download pipeline.
//!
//! Orchestrates one rasterization download end to end:
//!
//! 1. Fix the destination — synthesize a default filename when none was
//!    given — and resolve the output format (from the path's extension when
//!    the destination is path-like, from the explicit token otherwise).
//! 2. Build the request payload from inputs, bands, data type, format, and
//!    the context's derived rasterization parameters.
//! 3. Invoke the service exactly once and translate its failures into
//!    domain errors.
//! 4. Enforce the single-artifact response invariant.
//! 5. Persist the artifact and report where it landed.
//!
//! The pipeline is synchronous and shares no state across invocations; the
//! service call is the only blocking operation and no timeout is imposed
//! here (bound the client instead, see
//! [`HttpRasterClient::with_timeout`](crate::HttpRasterClient::with_timeout)).

use std::path::PathBuf;

use crate::client::RasterClient;
use crate::context::RasterContext;
use crate::destination::{default_filename, Destination};
use crate::error::{DownloadError, ServiceError};
use crate::format::ImageFormat;
use crate::request::{build_request, RasterRequest};

/// Format assumed when neither a destination extension nor an explicit
/// format token is available.
pub const DEFAULT_FORMAT: ImageFormat = ImageFormat::GeoTiff;

/// Download `inputs` as a single rasterized image and persist it.
///
/// # Arguments
///
/// * `inputs` - ordered input image identifiers; must be non-empty
/// * `bands` - ordered band names for the request and for default filenames
/// * `ctx` - caller-owned source of derived rasterization parameters
/// * `data_type` - output pixel data type token (e.g. `"UInt16"`)
/// * `dest` - where to persist the artifact; when `None`, a filename is
///   synthesized from the inputs, bands, and format
/// * `format` - explicit format token; ignored for path-like destinations
///   (the extension wins), defaults to `tif` when absent
/// * `client` - the rasterization service client; called exactly once
///
/// # Returns
///
/// `Some(path)` naming the file written for a path-like or absent
/// destination, `None` for a stream destination (the caller owns it).
///
/// # Errors
///
/// See [`DownloadError`]: empty inputs with no destination, unsupported
/// format, missing inputs on the service side, a rejected request (with the
/// full payload dump), a response-shape violation, or a write failure.
/// Nothing is retried; no error is swallowed.
pub fn download<C: RasterClient, X: RasterContext>(
    inputs: &[String],
    bands: &[String],
    ctx: &X,
    data_type: &str,
    dest: Option<Destination<'_>>,
    format: Option<&str>,
    client: &C,
) -> Result<Option<PathBuf>, DownloadError> {
    let dest = match dest {
        Some(dest) => dest,
        None => {
            let format = resolve_token(format)?;
            Destination::Path(PathBuf::from(default_filename(inputs, bands, format)?))
        }
    };

    // A recognizable extension always wins over the explicit token.
    let output_format = match &dest {
        Destination::Path(path) => ImageFormat::from_path(path)?,
        Destination::Stream(_) => resolve_token(format)?,
    };

    let request = build_request(inputs, bands, ctx, data_type, output_format);

    tracing::debug!(
        inputs = request.inputs.len(),
        bands = ?request.bands,
        output_format = output_format.wire_token(),
        "invoking rasterization service"
    );

    let result = client
        .raster(&request)
        .map_err(|e| translate_service_error(e, &request))?;

    let artifact = result.into_single_file()?;
    dest.write(&artifact)
}

fn resolve_token(format: Option<&str>) -> Result<ImageFormat, DownloadError> {
    match format {
        Some(name) => ImageFormat::from_name(name),
        None => Ok(DEFAULT_FORMAT),
    }
}

/// The single mapping from remote failure kinds to domain errors.
///
/// `NotFound` names the offending input id(s); `BadRequest` embeds the
/// service's message plus a full dump of the request payload. Every other
/// failure passes through unchanged.
fn translate_service_error(err: ServiceError, request: &RasterRequest) -> DownloadError {
    match err {
        ServiceError::NotFound(_) => {
            let msg = if request.inputs.len() == 1 {
                format!("'{}' does not exist in the catalog", request.inputs[0])
            } else {
                format!(
                    "some or all of these ids do not exist in the catalog: {:?}",
                    request.inputs
                )
            };
            DownloadError::NotFound(msg)
        }
        ServiceError::BadRequest(message) => DownloadError::InvalidRequest {
            message,
            request: request.dump(),
        },
        other => DownloadError::Service(other),
    }
}

// =============================================================================
// Tests
// =============================================================================
