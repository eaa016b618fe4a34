//! HTTP API Layer
//!
//! REST API for the lecturer claims workflow, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one per operation, each checks a role capability first
//! - **Middleware**: JWT authentication, audit logging, request ids, tracing
//! - **DTOs**: request and response bodies
//! - **Reports**: text and CSV rendering of the payment report
//! - **Error Handling**: domain errors mapped to status codes in one place
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(claim_service, lecturer_service, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reports;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimService, DocumentPolicy};
use domain_lecturer::LecturerService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, lecturers, reports as report_handlers};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: Arc<ClaimService>,
    pub lecturers: Arc<LecturerService>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(claims: ClaimService, lecturers: LecturerService, config: ApiConfig) -> Self {
        Self {
            claims: Arc::new(claims),
            lecturers: Arc::new(lecturers),
            config: Arc::new(config),
        }
    }
}

/// Room left in an upload request for the form fields and multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest claim request accepted
///
/// Follows the document size limit, so an oversize document reaches the
/// domain check and is answered with a validation error.
pub fn upload_body_limit(policy: &DocumentPolicy) -> usize {
    usize::try_from(policy.max_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Creates the main API router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let body_limit = upload_body_limit(&state.claims.rules().documents);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim).get(claims::list_claims))
        .route("/pending", get(claims::list_pending))
        .route("/approved", get(claims::list_approved))
        .route("/:id", get(claims::get_claim).delete(claims::delete_claim))
        .route("/:id/document", get(claims::get_document))
        .route("/:id/approve", post(claims::approve_claim))
        .route("/:id/reject", post(claims::reject_claim))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit));

    let lecturer_routes = Router::new()
        .route("/", get(lecturers::list_lecturers).post(lecturers::create_lecturer))
        .route(
            "/:id",
            get(lecturers::get_lecturer)
                .put(lecturers::update_lecturer)
                .delete(lecturers::delete_lecturer),
        );

    let report_routes = Router::new().route("/approved", get(report_handlers::approved_report));

    // Layers run bottom-up: auth populates the claims the audit log reads.
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/lecturers", lecturer_routes)
        .nest("/reports", report_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
