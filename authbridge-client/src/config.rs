/// Client configuration
///
/// # Environment Variables
///
/// - `API_URL`: API base URL (default: `http://localhost:5000/api`)
/// - `AUTHBRIDGE_TOKEN_FILE`: Token store path (default: `.authbridge_token`)

use std::env;
use std::path::PathBuf;

/// Configuration for the client shell
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the AuthBridge API, without a trailing slash
    pub api_url: String,

    /// Path of the token store file
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Loads configuration from environment variables, honoring `.env`
    ///
    /// Every variable has a development default, so this cannot fail.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = normalize_api_url(
            &env::var("API_URL").unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
        );

        let token_file = env::var("AUTHBRIDGE_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".authbridge_token"));

        Self {
            api_url,
            token_file,
        }
    }
}

/// Strips trailing slashes so endpoint paths can always be appended
fn normalize_api_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(
            normalize_api_url("http://localhost:5000/api/"),
            "http://localhost:5000/api"
        );
        assert_eq!(
            normalize_api_url("http://localhost:5000/api"),
            "http://localhost:5000/api"
        );
    }
}
