/// Password hashing module using bcrypt
///
/// This module provides password hashing for credential storage using the
/// bcrypt algorithm with a configurable cost factor.
///
/// # Security
///
/// - **Algorithm**: bcrypt (Blowfish-based, `$2b$` format)
/// - **Cost factor**: 10 by default (2^10 key expansion rounds)
/// - **Salt**: 16 bytes random, generated per hash
/// - **Output**: modular crypt format string embedding version, cost, and salt
///
/// The cost factor is tunable through configuration so deployments can raise
/// it as hardware improves without touching code. Stored hashes keep working
/// because the cost is embedded in the hash string.
///
/// # Example
///
/// ```
/// use authbridge_shared::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Hash a password
/// let password = "super_secret_password_123";
/// let hash = hash_password(password, DEFAULT_HASH_COST)?;
///
/// // Verify the password
/// assert!(verify_password(password, &hash)?);
///
/// // Wrong password fails
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```
use bcrypt::BcryptError;

/// Default bcrypt cost factor used when configuration does not override it
pub const DEFAULT_HASH_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using bcrypt with the given cost factor
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
/// * `cost` - bcrypt cost factor (valid range 4..=31; use [`DEFAULT_HASH_COST`]
///   unless configuration says otherwise)
///
/// # Returns
///
/// Modular crypt format hash (includes version, cost, salt, and hash)
///
/// Example output:
/// ```text
/// $2b$10$N9qo8uLOickgx2ZMRZoMye...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails or the cost factor is
/// out of range
///
/// # Example
///
/// ```
/// use authbridge_shared::auth::password::{hash_password, DEFAULT_HASH_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("my_password", DEFAULT_HASH_COST)?;
/// assert!(hash.starts_with("$2b$10$"));
/// # Ok(())
/// # }
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    // Salt generation and key expansion happen inside the bcrypt crate
    bcrypt::hash(password, cost)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))
}

/// Verifies a password against a stored hash
///
/// The cost factor and salt are read from the hash string, so hashes produced
/// with older cost settings keep verifying after the configuration changes.
///
/// # Arguments
///
/// * `password` - The plaintext password to verify
/// * `hash` - The stored password hash (modular crypt format)
///
/// # Returns
///
/// `Ok(true)` if password matches, `Ok(false)` if it doesn't match
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed,
/// `PasswordError::VerifyError` for other failures.
///
/// # Example
///
/// ```
/// use authbridge_shared::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let password = "correct_password";
/// let hash = hash_password(password, DEFAULT_HASH_COST)?;
///
/// // Correct password
/// assert!(verify_password(password, &hash)?);
///
/// // Incorrect password
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    match bcrypt::verify(password, hash) {
        Ok(matches) => Ok(matches),
        Err(BcryptError::InvalidHash(e)) => {
            Err(PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))
        }
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "test_password_123";
        let hash = hash_password(password, DEFAULT_HASH_COST).expect("Hash should succeed");

        // Hash should use the 2b format version
        assert!(hash.starts_with("$2b$"));

        // Hash should embed the default cost factor
        assert!(hash.starts_with("$2b$10$"));
    }

    #[test]
    fn test_hash_password_custom_cost() {
        let hash = hash_password("test_password_123", 4).expect("Hash should succeed");
        assert!(hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_hash_password_invalid_cost() {
        let result = hash_password("test_password_123", 2);
        assert!(result.is_err(), "Cost below bcrypt minimum should fail");
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password, DEFAULT_HASH_COST).expect("Hash 1 should succeed");
        let hash2 = hash_password(password, DEFAULT_HASH_COST).expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password, DEFAULT_HASH_COST).expect("Hash should succeed");

        let result = verify_password(password, &hash).expect("Verify should succeed");
        assert!(result, "Correct password should verify");
    }

    #[test]
    fn test_verify_password_incorrect() {
        let password = "correct_password";
        let hash = hash_password(password, DEFAULT_HASH_COST).expect("Hash should succeed");

        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_empty() {
        let password = "password";
        let hash = hash_password(password, DEFAULT_HASH_COST).expect("Hash should succeed");

        let result = verify_password("", &hash).expect("Verify should succeed");
        assert!(!result, "Empty password should not verify");
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "invalid_hash");
        assert!(result.is_err(), "Invalid hash should return error");
    }

    #[test]
    fn test_verify_password_accepts_lower_cost_hashes() {
        // Hashes minted before a cost bump must keep verifying
        let hash = hash_password("migrated_password", 4).expect("Hash should succeed");
        let result = verify_password("migrated_password", &hash).expect("Verify should succeed");
        assert!(result);
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "very_long_password_that_is_longer_than_usual_passwords_12345",
        ];

        for password in passwords {
            let hash = hash_password(password, 4).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }
}
