/// Client error types
///
/// Server error bodies surface through [`ClientError::Api`] with the body's
/// `message` text; everything else wraps the transport or filesystem cause.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the client shell
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error body
    #[error("{message}")]
    Api {
        /// HTTP status of the reply
        status: StatusCode,
        /// The server's `message` text
        message: String,
    },

    /// A profile call came back 401/403; the stored token has been cleared
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// A profile call was attempted with no stored token
    #[error("Not logged in; run `authbridge-client login <username> <password>` first")]
    NotLoggedIn,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token store filesystem failure
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_only_the_message() {
        let err = ClientError::Api {
            status: StatusCode::CONFLICT,
            message: "Username already exists.".to_string(),
        };

        assert_eq!(err.to_string(), "Username already exists.");
    }
}
