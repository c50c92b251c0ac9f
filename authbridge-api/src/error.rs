/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `ApiResult<T>`, which converts to the appropriate
/// status code with a `{"message": "..."}` body, the only error shape this
/// API speaks.
///
/// Infrastructure failures are mapped per handler so the 500 body carries
/// that operation's generic message; [`ApiError::internal`] logs the detail
/// and keeps it out of the response.
///
/// # Example
///
/// ```
/// use authbridge_api::error::{ApiError, ApiResult};
///
/// fn guard(age: i64) -> ApiResult<i64> {
///     if !(0..=150).contains(&age) {
///         return Err(ApiError::BadRequest(
///             "Age must be a number between 0 and 150.".to_string(),
///         ));
///     }
///     Ok(age)
/// }
///
/// assert!(guard(200).is_err());
/// ```
use axum::{
    extract::rejection::JsonRejection,
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
///
/// The variants cover every failure status this API produces; 401s come from
/// the session verifier in `authbridge_shared::auth::middleware`, which
/// responds before a handler runs.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409), the duplicate-username case
    Conflict(String),

    /// Internal server error (500)
    ///
    /// Carries the operation's public message only; construct via
    /// [`ApiError::internal`] so the underlying failure is logged.
    Internal(String),
}

/// Error response format
///
/// Every error body is this single field.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Builds a 500 whose body carries the operation's generic message
    ///
    /// The underlying failure is logged here and never sent to the client.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_api::error::{ApiError, ApiResult};
    /// # fn store_call() -> Result<(), std::io::Error> { Ok(()) }
    /// # fn example() -> ApiResult<()> {
    /// store_call().map_err(|e| ApiError::internal("Server error during login.", e))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn internal(public_message: &str, err: impl fmt::Display) -> Self {
        tracing::error!(error = %err, "{}", public_message);
        ApiError::Internal(public_message.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(ErrorResponse { message })).into_response()
    }
}

/// JSON body extractor with this API's rejection behavior
///
/// Same as `axum::Json` except a body that fails to parse produces a 400
/// `{"message": "Invalid request body."}` instead of axum's default 422
/// with a plain-text body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("Invalid request body.".to_string())
    }
}
