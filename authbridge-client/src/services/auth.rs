/// Identity service calls
///
/// Register, login, and logout against `/api/auth`. Login persists the
/// returned session token in the token store; logout clears it without a
/// server call, the server holding no session state.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::services;
use crate::token_store::TokenStore;
use serde::{Deserialize, Serialize};

/// Registration confirmation from the server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    /// Confirmation message
    pub message: String,
    /// The newly assigned user id
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Calls on the identity endpoints
pub struct AuthService {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl AuthService {
    /// Creates the service from client configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            tokens: TokenStore::new(&config.token_file),
        }
    }

    /// Registers a new user
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Registered, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(services::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Logs in and persists the session token
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(services::api_error(response).await);
        }

        let body: LoginResponse = response.json().await?;
        self.tokens.save(&body.token)?;
        tracing::debug!("Session token stored");

        Ok(())
    }

    /// Clears the stored session token
    pub fn logout(&self) -> Result<(), ClientError> {
        self.tokens.clear()?;
        Ok(())
    }
}
