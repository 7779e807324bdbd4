//! Router assembly.

mod common;
mod openapi;
mod resources;

pub use common::common_routes;
pub use openapi::{openapi_routes, ApiDoc};
pub use resources::{bike_routes, user_routes};

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: operational routes, OpenAPI document, users and bikes,
/// with request tracing and a request body size cap.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(openapi_routes())
        .merge(user_routes(state.clone()))
        .merge(bike_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(server.body_limit_bytes)),
        )
}
