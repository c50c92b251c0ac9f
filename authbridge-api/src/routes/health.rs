/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - Credential store connectivity
/// - Document store connectivity
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "documentStore": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status: "healthy" when both stores respond
    pub status: String,

    /// Application version
    pub version: String,

    /// Credential store status
    pub database: String,

    /// Document store status
    #[serde(rename = "documentStore")]
    pub document_store: String,
}

/// Health check handler
///
/// Reports "healthy" only when both backing stores answer; a single
/// unreachable store degrades the service without failing the request.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match authbridge_shared::db::pool::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    let document_store_status = match state.docs.ping().await {
        Ok(true) => "connected",
        _ => "disconnected",
    };

    let healthy = database_status == "connected" && document_store_status == "connected";

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
        document_store: document_store_status.to_string(),
    }))
}
