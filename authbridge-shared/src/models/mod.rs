/// Data models for AuthBridge
///
/// This module contains the two halves of a user record and their store
/// operations.
///
/// # Models
///
/// - `user`: Credential rows in the relational store (login identity)
/// - `profile`: Profile documents in the document store (demographic fields)
///
/// The halves are joined by the numeric user id: the credential row's
/// BIGSERIAL `id` appears in the profile document as the string `userId`.
///
/// # Example
///
/// ```no_run
/// use authbridge_shared::models::user::{User, CreateUser};
/// use authbridge_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$2b$10$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod profile;
pub mod user;
