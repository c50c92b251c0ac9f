/// HTTP service calls against the AuthBridge API
///
/// - `auth`: register / login / logout
/// - `profile`: authenticated profile fetch and update
///
/// Each service owns a `reqwest` client plus the token store, and reads the
/// base URL from [`ClientConfig`](crate::config::ClientConfig).

use crate::error::ClientError;
use serde::Deserialize;

pub mod auth;
pub mod profile;

/// Error body shape shared by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Builds a [`ClientError::Api`] from a non-success response
///
/// Falls back to the status line when the body is not the expected JSON.
pub(crate) async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP {status}"),
    };

    ClientError::Api { status, message }
}
