//! Reader management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reader::{CreateReader, ReaderDetails, UpdateReader},
};

/// Register a new reader
#[utoipa::path(
    post,
    path = "/readers",
    tag = "readers",
    request_body = CreateReader,
    responses(
        (status = 201, description = "Reader created", body = ReaderDetails),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_reader(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateReader>,
) -> AppResult<(StatusCode, Json<ReaderDetails>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reader = state.services.readers.create_reader(payload).await?;
    Ok((StatusCode::CREATED, Json(reader)))
}

/// Get reader details by ID. Looking a reader up refreshes their last visit.
#[utoipa::path(
    get,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Reader details", body = ReaderDetails),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReaderDetails>> {
    let reader = state.services.readers.get_reader(id).await?;
    Ok(Json(reader))
}

/// Update a reader's name and address
#[utoipa::path(
    put,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    request_body = UpdateReader,
    responses(
        (status = 200, description = "Reader updated", body = ReaderDetails),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn update_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReader>,
) -> AppResult<Json<ReaderDetails>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reader = state.services.readers.update_reader(id, payload).await?;
    Ok(Json(reader))
}

/// Delete a reader
#[utoipa::path(
    delete,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 204, description = "Reader deleted"),
        (status = 404, description = "Reader not found"),
        (status = 409, description = "Reader still has books on loan")
    )
)]
pub async fn delete_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.readers.delete_reader(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
