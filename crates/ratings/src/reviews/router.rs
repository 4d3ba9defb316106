use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::directory::{DirectoryClient, DirectoryError};

use super::domain::{CompanyEvaluation, CompanyEvaluationDraft, ComplaintDraft};
use super::repository::{EvaluationFilter, RepositoryError, ReviewRepository};
use super::service::{ReviewService, ReviewServiceError};

/// Router builder exposing the company review endpoints.
pub fn review_router<R, D>(service: Arc<ReviewService<R, D>>) -> Router
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies/:id/company-evaluation",
            post(create_evaluation_handler::<R, D>),
        )
        .route(
            "/api/v1/companies/:id/company-evaluations",
            get(list_evaluations_handler::<R, D>),
        )
        .route(
            "/api/v1/companies/:id/general-ratings",
            get(general_ratings_handler::<R, D>),
        )
        .route(
            "/api/v1/company-evaluations/:id/increase-utility-rating",
            patch(increase_utility_handler::<R, D>),
        )
        .route(
            "/api/v1/company-evaluations/:id/increase-non-utility-rating",
            patch(increase_non_utility_handler::<R, D>),
        )
        .route(
            "/api/v1/reporting-reason-types",
            get(reporting_reason_types_handler::<R, D>),
        )
        .route(
            "/api/v1/company-evaluation/:id/complaints",
            post(file_complaint_handler::<R, D>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationPage {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) items: Vec<CompanyEvaluation>,
}

fn error_response(error: ReviewServiceError) -> Response {
    let status = match &error {
        ReviewServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::Directory(DirectoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ReviewServiceError::Directory(_) => StatusCode::BAD_GATEWAY,
        ReviewServiceError::EvaluationNotFound(_) | ReviewServiceError::ReasonTypeNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        ReviewServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReviewServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn create_evaluation_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(company_id): Path<i64>,
    Json(draft): Json<CompanyEvaluationDraft>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.create_evaluation(company_id, draft).await {
        Ok(evaluation) => (StatusCode::CREATED, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_evaluations_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(company_id): Path<i64>,
    Query(filter): Query<EvaluationFilter>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.list_evaluations(company_id, &filter) {
        Ok(items) => (
            StatusCode::OK,
            Json(EvaluationPage {
                page: filter.page,
                page_size: filter.page_size,
                items,
            }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn general_ratings_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(company_id): Path<i64>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.general_ratings(company_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn increase_utility_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(evaluation_id): Path<i64>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.mark_useful(evaluation_id) {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn increase_non_utility_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(evaluation_id): Path<i64>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.mark_not_useful(evaluation_id) {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reporting_reason_types_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.reporting_reason_types() {
        Ok(types) => (StatusCode::OK, Json(types)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn file_complaint_handler<R, D>(
    State(service): State<Arc<ReviewService<R, D>>>,
    Path(evaluation_id): Path<i64>,
    Json(draft): Json<ComplaintDraft>,
) -> Response
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    match service.file_complaint(evaluation_id, draft) {
        Ok(complaint) => (StatusCode::CREATED, Json(complaint)).into_response(),
        Err(error) => error_response(error),
    }
}
