/// Authentication middleware for Axum
///
/// This module provides the session verifier that guards protected routes.
/// It extracts the Bearer token from the Authorization header, validates it,
/// and adds the authenticated user to request extensions.
///
/// # Request Extensions
///
/// After successful authentication, the middleware adds:
/// - `AuthUser`: Contains the numeric user id from the token subject
///
/// # Rejections
///
/// All rejections are 401 responses with a JSON `{"message": ...}` body. The
/// message distinguishes a missing header, a malformed header, and a token
/// that failed validation; expired tokens report the same message as invalid
/// ones.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use authbridge_shared::auth::middleware::{create_jwt_middleware, AuthUser};
///
/// async fn protected_handler(Extension(auth): Extension<AuthUser>) -> String {
///     format!("Hello, user {}!", auth.id)
/// }
///
/// let app: Router = Router::new()
///     .route("/profile", get(protected_handler))
///     .layer(middleware::from_fn(create_jwt_middleware("your-jwt-secret")));
/// ```
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::{validate_token, Claims, JwtError};

/// Authenticated user added to request extensions
///
/// Handlers behind the session verifier can extract it using Axum's
/// `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use authbridge_shared::auth::middleware::AuthUser;
///
/// async fn handler(Extension(auth): Extension<AuthUser>) -> String {
///     format!("User: {}", auth.id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Authenticated user ID (token subject)
    pub id: i64,
}

impl AuthUser {
    /// Creates the auth extension from validated claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self { id: claims.sub }
    }
}

/// Error type for the session verifier
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Missing Authorization header
    MissingToken,

    /// Header present but not `Bearer <token>`
    InvalidFormat,

    /// Token failed validation (bad signature, expired, wrong issuer)
    InvalidToken,
}

impl AuthError {
    /// Client-facing message for this rejection
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "No token, authorization denied",
            AuthError::InvalidFormat => "Invalid token format. Expected \"Bearer <token>\"",
            AuthError::InvalidToken => "Token is not valid",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": self.message() })),
        )
            .into_response()
    }
}

/// JWT session verification middleware
///
/// Validates tokens from the `Authorization: Bearer <token>` header.
/// The header must split into exactly two space-separated parts and the
/// scheme must be exactly `Bearer`.
///
/// # Arguments
///
/// * `secret` - JWT secret for validation
/// * `req` - Request
/// * `next` - Next middleware/handler
///
/// # Returns
///
/// Response with `AuthUser` extension added on success
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - Header is not exactly `Bearer <token>`
/// - Token validation fails (including expiry)
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    // Exactly two parts, case-sensitive Bearer scheme
    let parts: Vec<&str> = auth_header.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AuthError::InvalidFormat);
    }
    let token = parts[1];

    // Validate token; the client sees one message, the log keeps the reason
    let claims = validate_token(token, &secret).map_err(|e| {
        match e {
            JwtError::Expired => tracing::debug!("rejected expired session token"),
            _ => tracing::debug!(error = %e, "rejected session token"),
        }
        AuthError::InvalidToken
    })?;

    // Add auth user to request extensions
    let auth_user = AuthUser::from_claims(&claims);
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Creates a JWT session middleware closure
///
/// Helper function that captures the JWT secret and returns a middleware
/// function suitable for `axum::middleware::from_fn`.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use authbridge_shared::auth::middleware::create_jwt_middleware;
///
/// let app: Router = Router::new()
///     .route("/profile", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_jwt_middleware("secret")));
/// ```
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}
