use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::directory::{DirectoryClient, DirectoryError};
use crate::reviews::repository::RepositoryError;

use super::domain::{
    ApplicantDraft, ApplicantEvaluationDraft, RecruitmentProcessEvaluationDraft,
};
use super::repository::ApplicantRepository;
use super::service::{ApplicantService, ApplicantServiceError};

/// Router builder exposing the applicant endpoints.
pub fn applicant_router<R, D>(service: Arc<ApplicantService<R, D>>) -> Router
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    Router::new()
        .route("/api/v1/applicants", post(register_handler::<R, D>))
        .route(
            "/api/v1/applicants/:tracking_code",
            get(track_handler::<R, D>),
        )
        .route(
            "/api/v1/postulation-statuses",
            get(postulation_statuses_handler::<R, D>),
        )
        .route(
            "/api/v1/applicants/:id/applicant-evaluation",
            post(applicant_evaluation_handler::<R, D>),
        )
        .route(
            "/api/v1/applicants/:id/recruitment-process-evaluation",
            post(recruitment_evaluation_handler::<R, D>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackQuery {
    pub(crate) paternal_last_name: String,
}

fn error_response(error: ApplicantServiceError) -> Response {
    let status = match &error {
        ApplicantServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicantServiceError::Directory(DirectoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ApplicantServiceError::Directory(_) => StatusCode::BAD_GATEWAY,
        ApplicantServiceError::ApplicantNotFound(_)
        | ApplicantServiceError::ApplicationNotFound => StatusCode::NOT_FOUND,
        ApplicantServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicantServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn register_handler<R, D>(
    State(service): State<Arc<ApplicantService<R, D>>>,
    Json(draft): Json<ApplicantDraft>,
) -> Response
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.register(draft).await {
        Ok(applicant) => (StatusCode::CREATED, Json(applicant)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn track_handler<R, D>(
    State(service): State<Arc<ApplicantService<R, D>>>,
    Path(tracking_code): Path<String>,
    Query(query): Query<TrackQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.track(&tracking_code, &query.paternal_last_name) {
        Ok(applicant) => (StatusCode::OK, Json(applicant)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn postulation_statuses_handler<R, D>(
    State(service): State<Arc<ApplicantService<R, D>>>,
) -> Response
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.postulation_statuses() {
        Ok(statuses) => (StatusCode::OK, Json(statuses)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applicant_evaluation_handler<R, D>(
    State(service): State<Arc<ApplicantService<R, D>>>,
    Path(applicant_id): Path<i64>,
    Json(draft): Json<ApplicantEvaluationDraft>,
) -> Response
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.create_applicant_evaluation(applicant_id, draft).await {
        Ok(evaluation) => (StatusCode::CREATED, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recruitment_evaluation_handler<R, D>(
    State(service): State<Arc<ApplicantService<R, D>>>,
    Path(applicant_id): Path<i64>,
    Json(draft): Json<RecruitmentProcessEvaluationDraft>,
) -> Response
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.create_recruitment_evaluation(applicant_id, draft) {
        Ok(evaluation) => (StatusCode::CREATED, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}
