//! Claims handlers

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::debug;

use core_kernel::ClaimId;
use domain_claims::Attachment;

use super::parse_id;
use crate::auth::{Capability, Claims};
use crate::dto::claims::{ClaimResponse, SubmitClaimForm};
use crate::{error::ApiError, AppState};

/// Submits a claim from a multipart form
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    user.require(Capability::SubmitClaim)?;

    let (candidate, attachment) = read_form(multipart).await?.into_submission()?;
    let claim = state.claims.submit(candidate, attachment).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

async fn read_form(mut multipart: Multipart) -> Result<SubmitClaimForm, ApiError> {
    let mut form = SubmitClaimForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "document" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            // An empty file input still sends a part with no name and no bytes.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            let mut attachment = Attachment::new(file_name, bytes.to_vec());
            if let Some(content_type) = content_type {
                attachment = attachment.with_content_type(content_type);
            }
            form.document = Some(attachment);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "lecturer_name" => form.lecturer_name = Some(value),
            "hours_worked" => form.hours_worked = Some(value),
            "hourly_rate" => form.hourly_rate = Some(value),
            "notes" => form.notes = Some(value),
            other => debug!(field = %other, "Ignoring unknown form field"),
        }
    }
    Ok(form)
}

/// Lists every claim
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    user.require(Capability::TrackClaims)?;
    let claims = state.claims.list_all().await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Lists claims awaiting review
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    user.require(Capability::ReviewClaims)?;
    let claims = state.claims.list_pending().await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Lists approved claims
pub async fn list_approved(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    user.require(Capability::ViewApproved)?;
    let claims = state.claims.list_approved().await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    user.require(Capability::TrackClaims)?;
    let id: ClaimId = parse_id(&id)?;
    Ok(Json(state.claims.get(id).await?.into()))
}

/// Streams a claim's supporting document
pub async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Capability::TrackClaims)?;
    let id: ClaimId = parse_id(&id)?;
    let (claim, bytes) = state.claims.document(id).await?;

    let file_name = claim
        .document_path
        .rsplit('/')
        .next()
        .unwrap_or("document")
        .to_string();
    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&file_name).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Approves a claim
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    user.require(Capability::ReviewClaims)?;
    let id: ClaimId = parse_id(&id)?;
    Ok(Json(state.claims.approve(id).await?.into()))
}

/// Rejects a claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    user.require(Capability::ReviewClaims)?;
    let id: ClaimId = parse_id(&id)?;
    Ok(Json(state.claims.reject(id).await?.into()))
}

/// Deletes a claim record
pub async fn delete_claim(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user.require(Capability::ReviewClaims)?;
    let id: ClaimId = parse_id(&id)?;
    state.claims.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
