/// Identity endpoints
///
/// This module provides user registration and login:
/// - Registration creates the credential row, then the empty profile document
/// - Login verifies the credential and issues a 1-hour session token
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get a session token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, Json},
};
use authbridge_shared::{
    auth::{
        jwt::{create_token, Claims},
        password::{hash_password, verify_password},
    },
    models::{
        profile::Profile,
        user::{CreateUser, User},
    },
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Register request
///
/// Both fields are optional at the wire level so presence is checked with
/// the contract's own message rather than a body-extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login username
    #[serde(default)]
    pub username: Option<String>,

    /// Plaintext password, hashed before storage
    #[serde(default)]
    pub password: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,

    /// Numeric id assigned by the credential store
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login username
    #[serde(default)]
    pub username: Option<String>,

    /// Plaintext password to verify
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token, valid for 1 hour
    pub token: String,
}

/// Register a new user
///
/// Creates the credential row and an empty profile document keyed by the
/// new numeric id. The username existence check is a fast path; the UNIQUE
/// constraint on the table is what actually guards concurrent registrations,
/// so a constraint violation from the insert maps to the same 409.
///
/// The two store writes are sequential, not transactional. If the profile
/// write fails after the credential insert succeeded, the fresh credential
/// row is deleted again (best effort, logged) and the request fails.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "hunter22"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "User registered successfully!",
///   "userId": 42
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or password shorter than 6 characters
/// - `409 Conflict`: Username already exists
/// - `500 Internal Server Error`: Either store failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required.".to_string(),
        ));
    }

    if password.chars().count() < 6 {
        return Err(ApiError::BadRequest(
            "Password must be at least 6 characters long.".to_string(),
        ));
    }

    // Fast-path existence check before paying for the hash
    let existing = User::find_by_username(&state.db, &username)
        .await
        .map_err(|e| ApiError::internal("Server error during registration.", e))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Username already exists.".to_string()));
    }

    let password_hash = hash_password(&password, state.hash_cost())
        .map_err(|e| ApiError::internal("Server error during registration.", e))?;

    let user = match User::create(
        &state.db,
        CreateUser {
            username: username.clone(),
            password_hash,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(e) if User::is_duplicate_username(&e) => {
            // Lost the race against a concurrent registration
            return Err(ApiError::Conflict("Username already exists.".to_string()));
        }
        Err(e) => return Err(ApiError::internal("Server error during registration.", e)),
    };

    if let Err(e) = Profile::create_empty(&state.docs, user.id).await {
        tracing::error!(
            user_id = user.id,
            error = %e,
            "Profile creation failed after credential insert; removing credential row"
        );
        if let Err(del_err) = User::delete(&state.db, user.id).await {
            tracing::error!(
                user_id = user.id,
                error = %del_err,
                "Compensating delete failed; credential row is orphaned"
            );
        }
        return Err(ApiError::Internal(
            "Server error during registration.".to_string(),
        ));
    }

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully!".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login and receive a session token
///
/// An unknown username and a wrong password both produce the same generic
/// 400; nothing in the response distinguishes which field was wrong.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "hunter22"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or credentials that do not match
/// - `500 Internal Server Error`: Store or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required.".to_string(),
        ));
    }

    let user = User::find_by_username(&state.db, &username)
        .await
        .map_err(|e| ApiError::internal("Server error during login.", e))?
        .ok_or_else(|| ApiError::BadRequest("Invalid Credentials.".to_string()))?;

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| ApiError::internal("Server error during login.", e))?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid Credentials.".to_string()));
    }

    let claims = Claims::new(user.id);
    let token = create_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::internal("Server error during login.", e))?;

    tracing::debug!(user_id = user.id, "Session token issued");

    Ok(Json(LoginResponse { token }))
}
