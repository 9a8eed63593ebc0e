use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and its schema is current.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

/// Database reachability and migration state.
#[derive(Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Highest applied migration version.
    pub schema_version: Option<i64>,
    /// Embedded migrations the database has not applied. `None` when the
    /// schema could not be read.
    pub pending_migrations: Option<usize>,
}

/// GET /health -- service, database, and schema health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = studio_db::health_check(&state.pool).await.is_ok();
    let schema = if reachable {
        match studio_db::schema_status(&state.pool).await {
            Ok(schema) => Some(schema),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read migration state");
                None
            }
        }
    } else {
        None
    };

    let current = schema.is_some_and(|s| s.is_current());
    let status = if reachable && current { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            schema_version: schema.and_then(|s| s.version),
            pending_migrations: schema.map(|s| s.pending),
        },
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
