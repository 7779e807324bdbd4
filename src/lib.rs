//! Bike-sharing REST backend: users, bikes, rentals and returns over SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Bike, BikeState, User};
pub use routes::{app, bike_routes, common_routes, openapi_routes, user_routes, ApiDoc};
pub use service::{BikeService, UserService};
pub use state::AppState;
pub use store::connect;
