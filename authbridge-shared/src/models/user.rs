/// User model and database operations
///
/// This module provides the User model and CRUD operations for the credential
/// store. A user row holds the login credentials only; profile data lives in
/// the document store keyed by the numeric user id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
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
/// // Create a new user
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$2b$10$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// println!("Created user: {}", user.id);
///
/// // Find by username
/// let found = User::find_by_username(&pool, "alice").await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User model representing a stored credential
///
/// Passwords are stored as bcrypt hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (BIGSERIAL, assigned by the database)
    ///
    /// This id joins the credential row to the profile document
    pub id: i64,

    /// Login username
    ///
    /// Must be unique across all users
    pub username: String,

    /// bcrypt password hash
    ///
    /// Never store plaintext passwords!
    /// Use the `auth::password` module for hashing/verification
    pub password_hash: String,

    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login username
    pub username: String,

    /// bcrypt password hash (NOT plaintext password!)
    pub password_hash: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// The id is assigned by the database sequence and returned with the row.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - User creation data
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID and timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username already exists (unique constraint violation; see
    ///   [`User::is_duplicate_username`])
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::user::{User, CreateUser};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let new_user = CreateUser {
    ///     username: "alice".to_string(),
    ///     password_hash: "$2b$10$...".to_string(),
    /// };
    ///
    /// let user = User::create(&pool, new_user).await?;
    /// println!("Created user: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - User ID to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_id(&pool, user_id).await? {
    ///     println!("Found user: {}", user.username);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Lookup is exact and case-sensitive.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `username` - Username to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_username(&pool, "alice").await? {
    ///     println!("Found user: {}", user.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Used as the compensating action when profile creation fails after the
    /// credential row was already inserted.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - ID of user to delete
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    /// let deleted = User::delete(&pool, user_id).await?;
    /// if deleted {
    ///     println!("User deleted");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts users holding the given username
    ///
    /// With the unique constraint in place the answer is 0 or 1; anything else
    /// means the constraint is missing.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `username` - Username to count
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn count_by_username(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Checks whether an insert error is a duplicate-username violation
    ///
    /// The unique constraint is the real guard against concurrent
    /// registrations; the handler's pre-check is only a fast path. This helper
    /// lets callers map the violation to a conflict response.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::user::{User, CreateUser};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, data: CreateUser) {
    /// match User::create(&pool, data).await {
    ///     Ok(user) => println!("created {}", user.id),
    ///     Err(e) if User::is_duplicate_username(&e) => println!("username taken"),
    ///     Err(e) => eprintln!("database error: {}", e),
    /// }
    /// # }
    /// ```
    pub fn is_duplicate_username(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err
                .constraint()
                .map(|c| c.contains("username"))
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.username, "alice");
        assert_eq!(create_user.password_hash, "hash");
    }

    #[test]
    fn test_is_duplicate_username_ignores_other_errors() {
        assert!(!User::is_duplicate_username(&sqlx::Error::RowNotFound));
        assert!(!User::is_duplicate_username(&sqlx::Error::PoolClosed));
    }

    // Database-backed tests live in tests/user_model_tests.rs
}
