use serde::Deserialize;

use crate::models::errors::ApiError;

/// Outcome discriminant carried by every backend response.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    BadRequest,
    RuntimeError
}

/// The uniform envelope returned by every backend endpoint.
///
/// `data` is populated iff `code` is `SUCCESS`, except for acknowledgement
/// endpoints whose success payload is itself `null` (modeled as
/// `ApiResponse<()>` and consumed through [`ApiResponse::into_ack`]).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ResponseCode,
    pub message: String,
    pub data: Option<T>
}

impl<T> ApiResponse<T> {
    /// Envelope the client manufactures when the transport itself fails.
    /// Mirrors what the backend would send for an internal error.
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::RuntimeError,
            message: message.into(),
            data: None
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }

    /// Unwraps the payload of a successful read.
    ///
    /// # Errors
    /// Returns `ApiError` carrying the envelope message for non-SUCCESS
    /// codes, or a runtime error if a SUCCESS envelope arrives without data.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.code {
            ResponseCode::Success => self.data.ok_or_else(|| {
                ApiError::RuntimeError("Response was missing its data payload".to_string())
            }),
            ResponseCode::BadRequest => Err(ApiError::BadRequest(self.message)),
            ResponseCode::RuntimeError => Err(ApiError::RuntimeError(self.message))
        }
    }

    /// Collapses an acknowledgement envelope, ignoring `data` entirely.
    ///
    /// # Errors
    /// Returns `ApiError` carrying the envelope message for non-SUCCESS codes.
    pub fn into_ack(self) -> Result<(), ApiError> {
        match self.code {
            ResponseCode::Success => Ok(()),
            ResponseCode::BadRequest => Err(ApiError::BadRequest(self.message)),
            ResponseCode::RuntimeError => Err(ApiError::RuntimeError(self.message))
        }
    }
}
