/// Profile service calls
///
/// Authenticated fetch and update of the profile view. Both calls attach the
/// stored bearer token; a 401 or 403 reply clears the token so the next
/// route resolution lands on Login.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::services;
use crate::token_store::TokenStore;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The merged profile view returned by the server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Login username
    pub username: String,
    /// Age in years
    pub age: Option<i64>,
    /// Date of birth, `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    /// Free-form contact information
    pub contact_information: Option<String>,
}

/// The stored document as returned after an update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub user_id: String,
    pub age: Option<i64>,
    pub date_of_birth: Option<String>,
    pub contact_information: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Update confirmation from the server
#[derive(Debug, Deserialize)]
pub struct Updated {
    /// Confirmation message
    pub message: String,
    /// The full stored document after the update
    pub profile: StoredProfile,
}

/// Fields to send in a profile update
///
/// `None` leaves the field out of the request, so the server keeps the
/// stored value; `Some(Value::Null)` sends an explicit null, which clears it.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<Value>,
}

/// Calls on the authenticated profile endpoints
pub struct ProfileService {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ProfileService {
    /// Creates the service from client configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            tokens: TokenStore::new(&config.token_file),
        }
    }

    /// Fetches the merged profile view
    pub async fn get(&self) -> Result<ProfileView, ClientError> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .get(format!("{}/profile", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        self.decode(response).await
    }

    /// Sends a profile update
    pub async fn update(&self, update: &ProfileUpdate) -> Result<Updated, ClientError> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .put(format!("{}/profile", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .json(update)
            .send()
            .await?;

        self.decode(response).await
    }

    fn bearer_token(&self) -> Result<String, ClientError> {
        self.tokens.load()?.ok_or(ClientError::NotLoggedIn)
    }

    /// Decodes a profile response, expiring the session on 401/403
    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            self.tokens.clear()?;
            return Err(ClientError::SessionExpired);
        }

        if !response.status().is_success() {
            return Err(services::api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_left_out_of_the_request() {
        let update = ProfileUpdate {
            age: Some(json!(30)),
            ..Default::default()
        };

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({ "age": 30 }));
    }

    #[test]
    fn test_null_fields_are_sent_explicitly() {
        let update = ProfileUpdate {
            age: Some(Value::Null),
            contact_information: Some(json!("a@b.com")),
            ..Default::default()
        };

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({ "age": null, "contactInformation": "a@b.com" }));
    }

    #[test]
    fn test_profile_view_decodes_server_body() {
        let view: ProfileView = serde_json::from_str(
            r#"{
                "username": "alice",
                "age": 30,
                "dateOfBirth": "1995-01-01",
                "contactInformation": "a@b.com"
            }"#,
        )
        .unwrap();

        assert_eq!(view.username, "alice");
        assert_eq!(view.age, Some(30));
        assert_eq!(view.date_of_birth.as_deref(), Some("1995-01-01"));
        assert_eq!(view.contact_information.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_updated_decodes_full_document() {
        let updated: Updated = serde_json::from_str(
            r#"{
                "message": "Profile updated successfully!",
                "profile": {
                    "userId": "42",
                    "age": null,
                    "dateOfBirth": null,
                    "contactInformation": "a@b.com",
                    "createdAt": "2026-01-01T00:00:00Z",
                    "updatedAt": "2026-02-01T12:00:00Z"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(updated.message, "Profile updated successfully!");
        assert_eq!(updated.profile.user_id, "42");
        assert_eq!(updated.profile.age, None);
        assert_eq!(updated.profile.contact_information.as_deref(), Some("a@b.com"));
    }
}
