use thiserror::Error;

/// Client-side rejection of a chosen file, raised before any network call.
///
/// The display strings are the exact messages rendered inline in the upload
/// dialog.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please upload a CSV file")]
    NotCsv,
    #[error("File size must be less than 10MB")]
    TooLarge
}

/// A backend call that did not produce a usable payload.
///
/// `BadRequest` carries a message authored by the backend (e.g. a malformed
/// CSV row); `RuntimeError` covers everything transport-shaped: network
/// unreachability, malformed bodies, and backend-side internal failures.
/// The display form is the bare message, which is what consumers surface.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    RuntimeError(String)
}
