use thiserror::Error;

/// Failure modes reported by the remote rasterization service.
///
/// These mirror what the service can say about a single raster call. The
/// download pipeline translates `NotFound` and `BadRequest` into richer
/// [`DownloadError`] variants; everything else passes through unchanged.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// One or more requested inputs do not exist on the service side.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected the shape of the request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Network or connection error reaching the service.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other service-side failure (unexpected status, malformed body).
    #[error("service error: {0}")]
    Unexpected(String),
}

/// Errors raised by the download pipeline.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// No inputs were given and no destination to name the artifact after.
    #[error("no inputs given to download")]
    NoInputs,

    /// A file extension or explicit format token was not recognized.
    #[error("unknown format '{given}'; possible values are {expected}")]
    UnsupportedFormat {
        /// The offending extension or token.
        given: String,
        /// Comma-separated list of every accepted value.
        expected: String,
    },

    /// The service reported that the requested input id(s) do not exist.
    #[error("{0}")]
    NotFound(String),

    /// The service rejected the request; carries the service's own message
    /// plus a dump of the full request payload for debugging.
    #[error(
        "error with request:\n{message}\n\
         for reference, the raster call was made with these arguments:\n{request}"
    )]
    InvalidRequest { message: String, request: String },

    /// The service returned no files for a raster call.
    #[error("unexpected missing results from raster call")]
    EmptyResult,

    /// The service returned more than one file for a single raster call.
    #[error("unexpected multiple files returned from single raster call: {0:?}")]
    MultipleResults(Vec<String>),

    /// Writing the artifact to a caller-supplied stream failed.
    #[error("unable to write artifact to the caller-supplied stream: {source}")]
    DestinationWrite {
        #[source]
        source: std::io::Error,
    },

    /// Any other service failure, passed through untranslated.
    #[error(transparent)]
    Service(ServiceError),

    /// Filesystem error creating directories or writing a path destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
