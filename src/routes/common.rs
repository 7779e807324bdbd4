//! Liveness, readiness and build info.

use crate::state::AppState;
use crate::store;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn live() -> Json<Status> {
    Json(Status { status: "ok", database: None })
}

/// 503 while the database does not answer.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match store::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(Status { status: "ok", database: Some("ok") })),
        Err(err) => {
            tracing::warn!(error = %err, "database not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Status { status: "degraded", database: Some("unavailable") }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BUILD)
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .route("/info", get(build_info))
        .with_state(state)
}
