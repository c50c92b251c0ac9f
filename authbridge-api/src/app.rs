/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
/// State is built once at boot and injected into handlers through Axum's
/// `State` extractor; no store handle lives in module scope.
///
/// # Example
///
/// ```no_run
/// use authbridge_api::{app::AppState, config::Config};
/// use authbridge_shared::db::pool::create_pool;
/// use authbridge_shared::docstore::client::DocStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.clone()).await?;
/// let docs = DocStore::new(config.docstore.clone()).await?;
/// let state = AppState::new(pool, docs, config);
/// let app = authbridge_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use authbridge_shared::auth::middleware::create_jwt_middleware;
use authbridge_shared::docstore::client::DocStore;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Both store handles and the config are cheap to clone (pool handles and
/// Arc respectively).
#[derive(Clone)]
pub struct AppState {
    /// Credential store connection pool
    pub db: PgPool,

    /// Profile document store client
    pub docs: DocStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, docs: DocStore, config: Config) -> Self {
        Self {
            db,
            docs,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured bcrypt cost factor
    pub fn hash_cost(&self) -> u32 {
        self.config.hashing.cost
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /api/
///     ├── /auth/                # Identity endpoints (public)
///     │   ├── POST /register
///     │   └── POST /login
///     └── /profile              # Profile endpoints (session token required)
///         ├── GET
///         └── PUT
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session verification (profile routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Identity routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Profile routes sit behind the session verifier
    let profile_routes = Router::new()
        .route(
            "/",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .layer(axum::middleware::from_fn(create_jwt_middleware(
            state.config.jwt.secret.clone(),
        )));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/profile", profile_routes);

    // CORS: a configured client origin locks the API to it; absent means
    // development mode and any origin is accepted
    let cors = match state.config.api.client_url.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600)),
            Err(_) => {
                tracing::warn!(
                    client_url = origin,
                    "CLIENT_URL is not a valid origin; cross-origin requests will be refused"
                );
                CorsLayer::new()
            }
        },
        None => CorsLayer::permissive(),
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
