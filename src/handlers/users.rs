//! User handlers: create, list, read, overwrite, delete, and the user's rented bikes.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{parse_id, ApiJson};
use crate::model::{Bike, User, UserInput};
use crate::response::{created, ok, ok_many};
use crate::service::{BikeService, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("user {}", id))
}

#[utoipa::path(
    post,
    path = "/user/",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
        (status = 409, description = "Duplicate phoneNum or email", body = ErrorBody),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UserInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::create(&state.pool, &input).await?;
    Ok(created(user))
}

#[utoipa::path(
    get,
    path = "/user/",
    tag = "users",
    responses((status = 200, description = "All users in id order", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list(&state.pool).await?;
    Ok(ok_many(users))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn read_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::read(&state.pool, id).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(user))
}

#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "Duplicate phoneNum or email", body = ErrorBody),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(input): ApiJson<UserInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ok(user))
}

#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The deleted user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "User still has rented bikes", body = ErrorBody),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::delete(&state.pool, id).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(user))
}

#[utoipa::path(
    get,
    path = "/user/{id}/bikes",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Bikes rented by the user", body = [Bike]),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn list_user_bikes(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let bikes = BikeService::list_by_user(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ok_many(bikes))
}
