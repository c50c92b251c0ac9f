/// Document store integration for profile data
///
/// This module provides the Redis-backed document store used for profile
/// documents:
/// - Connection pooling with automatic reconnection
/// - One JSON document per `profile:<user_id>` key
/// - Health checks for readiness reporting
///
/// # Architecture
///
/// ```text
/// ┌─────────────┐
/// │     API     │ ──SET──> profile:{user_id}  (JSON document)
/// └─────────────┘
///        │
///        │ GET
///        ▼
///  profile:{user_id}
/// ```
///
/// # Example
///
/// ```no_run
/// use authbridge_shared::docstore::client::{DocStore, DocStoreConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// // Create document store client
/// let config = DocStoreConfig::from_env()?;
/// let store = DocStore::new(config).await?;
///
/// // Health check
/// let healthy = store.ping().await?;
/// println!("Document store healthy: {}", healthy);
/// # Ok(())
/// # }
/// ```
pub mod client;

// Re-export common types for convenience
pub use client::{DocStore, DocStoreConfig, DocStoreError};
