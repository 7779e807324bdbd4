//! Bike handlers: create, list, read, availability filter, rent/return.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{parse_id, ApiJson};
use crate::model::{parse_availability, Bike, BikeStatusUpdate, NewBike};
use crate::response::{created, ok, ok_many};
use crate::service::BikeService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("bike {}", id))
}

#[utoipa::path(
    post,
    path = "/bike/",
    tag = "bikes",
    request_body = NewBike,
    responses(
        (status = 201, description = "Created bike, available with user_id -1", body = Bike),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
    )
)]
pub async fn create_bike(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewBike>,
) -> Result<impl IntoResponse, AppError> {
    let bike = BikeService::create(&state.pool, &input).await?;
    Ok(created(bike))
}

#[utoipa::path(
    get,
    path = "/bike/",
    tag = "bikes",
    responses((status = 200, description = "All bikes in id order", body = [Bike]))
)]
pub async fn list_bikes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bikes = BikeService::list(&state.pool).await?;
    Ok(ok_many(bikes))
}

#[utoipa::path(
    get,
    path = "/bike/{id}",
    tag = "bikes",
    params(("id" = i64, Path, description = "Bike id")),
    responses(
        (status = 200, description = "Bike", body = Bike),
        (status = 404, description = "No such bike", body = ErrorBody),
    )
)]
pub async fn read_bike(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let bike = BikeService::read(&state.pool, id).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(bike))
}

#[utoipa::path(
    get,
    path = "/bike/avail/{available}",
    tag = "bikes",
    params(("available" = String, Path, description = "true, false, 1 or 0")),
    responses(
        (status = 200, description = "Bikes with the given availability", body = [Bike]),
        (status = 400, description = "Unrecognised availability value", body = ErrorBody),
    )
)]
pub async fn list_bikes_by_availability(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let available = parse_availability(&raw)?;
    let bikes = BikeService::list_by_availability(&state.pool, available).await?;
    Ok(ok_many(bikes))
}

#[utoipa::path(
    put,
    path = "/bike/{id}",
    tag = "bikes",
    params(("id" = i64, Path, description = "Bike id")),
    request_body = BikeStatusUpdate,
    responses(
        (status = 200, description = "Bike after the rental or return", body = Bike),
        (status = 400, description = "Inconsistent state or unknown renter", body = ErrorBody),
        (status = 404, description = "No such bike", body = ErrorBody),
        (status = 409, description = "Bike is rented by another user", body = ErrorBody),
    )
)]
pub async fn update_bike_status(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(update): ApiJson<BikeStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let bike = BikeService::update_status(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ok(bike))
}
