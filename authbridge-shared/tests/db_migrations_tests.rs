/// Integration tests for database migrations
///
/// These tests require a running PostgreSQL database.
/// Run with: cargo test --test db_migrations_tests -- --ignored --test-threads=1
///
/// Connection settings are read from the environment:
/// export DB_HOST=localhost DB_PORT=5432 DB_USER=postgres DB_PASSWORD=postgres DB_DATABASE=authbridge_test

use authbridge_shared::db::migrations::{ensure_database_exists, run_migrations};
use authbridge_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use std::env;

/// Helper to build a test configuration from the environment
fn test_config() -> DatabaseConfig {
    DatabaseConfig {
        host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432),
        user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
        password: env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
        database: env::var("DB_DATABASE").unwrap_or_else(|_| "authbridge_test".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_ensure_database_exists() {
    let db_url = test_config().connection_url();

    // This should succeed whether database exists or not
    let result = ensure_database_exists(&db_url).await;
    assert!(result.is_ok(), "Failed to ensure database exists: {:?}", result.err());
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_run_migrations() {
    let config = test_config();

    // Ensure database exists
    ensure_database_exists(&config.connection_url())
        .await
        .expect("Failed to create database");

    let pool = create_pool(config).await.expect("Failed to create pool");

    let result = run_migrations(&pool).await;
    assert!(result.is_ok(), "Migrations failed: {:?}", result.err());

    close_pool(pool).await;
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_migrations_are_idempotent() {
    let config = test_config();

    ensure_database_exists(&config.connection_url())
        .await
        .expect("Failed to create database");

    let pool = create_pool(config).await.expect("Failed to create pool");

    // Running migrations twice should be a no-op the second time
    run_migrations(&pool).await.expect("First migration run failed");
    run_migrations(&pool).await.expect("Second migration run failed");

    close_pool(pool).await;
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_migration_creates_users_table() {
    let config = test_config();

    ensure_database_exists(&config.connection_url())
        .await
        .expect("Failed to create database");

    let pool = create_pool(config).await.expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'users'
        )",
    )
    .fetch_one(&pool)
    .await
    .expect("Failed to check for users table");

    assert!(exists, "Table 'users' should exist after migrations");

    // Verify the expected columns are present
    let expected_columns = vec!["id", "username", "password_hash", "created_at"];

    for column_name in expected_columns {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT FROM information_schema.columns
                WHERE table_schema = 'public'
                AND table_name = 'users'
                AND column_name = $1
            )",
        )
        .bind(column_name)
        .fetch_one(&pool)
        .await
        .expect(&format!("Failed to check for column {}", column_name));

        assert!(exists, "Column '{}' should exist on users", column_name);
    }

    close_pool(pool).await;
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_migration_creates_username_unique_constraint() {
    let config = test_config();

    ensure_database_exists(&config.connection_url())
        .await
        .expect("Failed to create database");

    let pool = create_pool(config).await.expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");

    // The duplicate-username guard relies on this constraint existing
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.table_constraints
            WHERE table_schema = 'public'
            AND table_name = 'users'
            AND constraint_type = 'UNIQUE'
            AND constraint_name LIKE '%username%'
        )",
    )
    .fetch_one(&pool)
    .await
    .expect("Failed to check for unique constraint");

    assert!(exists, "UNIQUE constraint on username should exist after migrations");

    close_pool(pool).await;
}
