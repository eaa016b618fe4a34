//! Lecturer record handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::LecturerId;

use super::parse_id;
use crate::auth::{Capability, Claims};
use crate::dto::lecturers::{LecturerRequest, LecturerResponse};
use crate::{error::ApiError, AppState};

pub async fn list_lecturers(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
) -> Result<Json<Vec<LecturerResponse>>, ApiError> {
    user.require(Capability::ManageLecturers)?;
    let lecturers = state.lecturers.list().await?;
    Ok(Json(lecturers.into_iter().map(Into::into).collect()))
}

pub async fn create_lecturer(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Json(request): Json<LecturerRequest>,
) -> Result<(StatusCode, Json<LecturerResponse>), ApiError> {
    user.require(Capability::ManageLecturers)?;
    let lecturer = state.lecturers.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(lecturer.into())))
}

pub async fn get_lecturer(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<LecturerResponse>, ApiError> {
    user.require(Capability::ManageLecturers)?;
    let id: LecturerId = parse_id(&id)?;
    Ok(Json(state.lecturers.get(id).await?.into()))
}

pub async fn update_lecturer(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
    Json(request): Json<LecturerRequest>,
) -> Result<Json<LecturerResponse>, ApiError> {
    user.require(Capability::ManageLecturers)?;
    let id: LecturerId = parse_id(&id)?;
    Ok(Json(state.lecturers.update(id, request.into()).await?.into()))
}

pub async fn delete_lecturer(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user.require(Capability::ManageLecturers)?;
    let id: LecturerId = parse_id(&id)?;
    state.lecturers.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
