//! Generated OpenAPI document, served at GET /openapi.json.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers;
use crate::model::{Bike, BikeStatusUpdate, NewBike, User, UserInput};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::read_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::users::list_user_bikes,
        handlers::bikes::create_bike,
        handlers::bikes::list_bikes,
        handlers::bikes::read_bike,
        handlers::bikes::list_bikes_by_availability,
        handlers::bikes::update_bike_status,
    ),
    components(schemas(User, UserInput, Bike, NewBike, BikeStatusUpdate, ErrorBody, ErrorDetail)),
    tags(
        (name = "users", description = "Riders"),
        (name = "bikes", description = "Bikes, rentals and returns"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
