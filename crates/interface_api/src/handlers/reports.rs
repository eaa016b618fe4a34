//! Report handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;

use domain_claims::PaymentReport;

use crate::auth::{Capability, Claims};
use crate::reports::ReportFormat;
use crate::{error::ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// Payment report over approved claims, as text or CSV
pub async fn approved_report(
    State(state): State<AppState>,
    Extension(user): Extension<Claims>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Capability::ViewApproved)?;

    let report = PaymentReport::from_claims(state.claims.list_approved().await?)?;
    let body = query
        .format
        .render(&report)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, query.format.content_type())], body))
}
