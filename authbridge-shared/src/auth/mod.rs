/// Authentication utilities
///
/// This module provides the authentication primitives for AuthBridge:
///
/// # Modules
///
/// - [`password`]: bcrypt password hashing and verification
/// - [`jwt`]: JWT session token generation and validation
/// - [`middleware`]: Axum session verifier for protected routes
///
/// # Security Features
///
/// - **Password Hashing**: bcrypt with a configurable cost factor (default 10)
/// - **JWT Tokens**: HS256 signing, 1 hour expiration, zero-leeway validation
///
/// # Example
///
/// ```no_run
/// use authbridge_shared::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
/// use authbridge_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password", DEFAULT_HASH_COST)?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // JWT token generation
/// let claims = Claims::new(42);
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
