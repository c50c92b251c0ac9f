/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test configuration from environment variables with local defaults
/// - Database setup (create, migrate) and per-user cleanup
/// - Document store connection, plus a deliberately broken stand-in
/// - In-process request helpers driving the router without a socket

use authbridge_api::app::{build_router, AppState};
use authbridge_api::config::{ApiConfig, Config, HashingConfig, JwtConfig};
use authbridge_shared::db::pool::DatabaseConfig;
use authbridge_shared::db::{migrations, pool};
use authbridge_shared::docstore::{DocStore, DocStoreConfig};
use authbridge_shared::models::profile::Profile;
use authbridge_shared::models::user::User;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;
use uuid::Uuid;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Builds a configuration pointing at the local test stores
///
/// Overridable through the same `DB_*` and `REDIS_URL` variables the server
/// reads, with localhost defaults and a dedicated `authbridge_test` database.
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            client_url: None,
        },
        database: DatabaseConfig {
            host: env_or("DB_HOST", "localhost"),
            port: env_or("DB_PORT", "5432").parse().expect("DB_PORT must be a number"),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "postgres"),
            database: env_or("DB_DATABASE", "authbridge_test"),
            max_connections: 5,
            ..Default::default()
        },
        docstore: DocStoreConfig {
            url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            connection_timeout_secs: 5,
            command_timeout_secs: 10,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
        // Minimum bcrypt cost keeps registration fast in tests
        hashing: HashingConfig { cost: 4 },
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub docs: DocStore,
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context against the local test stores
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();
        let docs = DocStore::new(config.docstore.clone()).await?;
        Self::with_docstore(config, docs).await
    }

    /// Creates a test context around a caller-provided document store
    ///
    /// Used to point the app at a store that accepts connections but fails
    /// commands, which is how the registration compensation path is driven.
    pub async fn with_docstore(config: Config, docs: DocStore) -> anyhow::Result<Self> {
        migrations::ensure_database_exists(&config.database.connection_url()).await?;
        let db = pool::create_pool(config.database.clone()).await?;
        migrations::run_migrations(&db).await?;

        let state = AppState::new(db.clone(), docs.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            docs,
            app,
            config,
        })
    }

    /// Removes a registered user's credential row and profile document
    pub async fn cleanup_user(&self, user_id: i64) -> anyhow::Result<()> {
        let mut conn = self.docs.get_connection();
        let _: () = redis::cmd("DEL")
            .arg(Profile::key(user_id))
            .query_async(&mut conn)
            .await?;
        User::delete(&self.db, user_id).await?;
        Ok(())
    }
}

/// Spawns a TCP server that accepts document store connections but fails
/// every command except PING
///
/// Returns a connection URL suitable for [`DocStoreConfig`]. The listener
/// accepts the initial connection, so the client constructs cleanly; the
/// first document write then comes back as a server error.
pub async fn spawn_unavailable_docstore() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => {
                            let reply: &[u8] = if buf[..n].windows(4).any(|w| w == b"PING") {
                                b"+PONG\r\n"
                            } else {
                                b"-ERR document store unavailable\r\n"
                            };
                            if socket.write_all(reply).await.is_err() {
                                return;
                            }
                        }
                    }
                }
            });
        }
    });

    Ok(format!("redis://{}", addr))
}

/// Sends a JSON request through the router and decodes the JSON response
///
/// `auth` is the raw `Authorization` header value, so tests can send
/// malformed schemes as easily as well-formed bearer tokens.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Generates a username no other test run will have used
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Registers a user through the API and returns the new user id
pub async fn register_user(app: &Router, username: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(&serde_json::json!({ "username": username, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["userId"].as_i64().expect("userId must be a number")
}

/// Logs a user in through the API and returns the session token
pub async fn login_user(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(&serde_json::json!({ "username": username, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token must be a string").to_string()
}
