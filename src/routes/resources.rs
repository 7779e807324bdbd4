//! User and bike routes. Collection paths answer with and without the trailing slash.

use crate::handlers::{
    create_bike, create_user, delete_user, list_bikes, list_bikes_by_availability, list_user_bikes,
    list_users, read_bike, read_user, update_bike_status, update_user,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user/", get(list_users).post(create_user))
        .route("/user", get(list_users).post(create_user))
        .route("/user/:id", get(read_user).put(update_user).delete(delete_user))
        .route("/user/:id/bikes", get(list_user_bikes))
        .with_state(state)
}

/// No delete route: bikes are never removed through the API.
pub fn bike_routes(state: AppState) -> Router {
    Router::new()
        .route("/bike/", get(list_bikes).post(create_bike))
        .route("/bike", get(list_bikes).post(create_bike))
        .route("/allbikes", get(list_bikes))
        .route("/bike/avail/:available", get(list_bikes_by_availability))
        .route("/bike/:id", get(read_bike).put(update_bike_status))
        .with_state(state)
}
