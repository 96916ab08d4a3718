use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::corroboration::CorroborationError;
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::workflows::prioritization::{AssessmentDraft, AssessmentId, PrioritizationRequest};

/// Body of `POST /api/v1/assessments`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    #[serde(flatten)]
    pub draft: AssessmentDraft,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Body of `POST /api/v1/prioritization`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationQuery {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub request: PrioritizationRequest,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnerFilter {
    owner: Option<String>,
}

/// Router builder exposing assessment CRUD, corroboration, and prioritization.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/v1/corroborations", post(corroborate_handler::<R>))
        .route("/api/v1/prioritization", post(prioritize_handler::<R>))
        .route("/api/v1/catalog", get(catalog_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<SubmitAssessmentRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.submit(request.draft, request.owner_id) {
        Ok(assessment) => (StatusCode::CREATED, axum::Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Query(filter): Query<OwnerFilter>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.list(filter.owner.as_deref()) {
        Ok(assessments) => (StatusCode::OK, axum::Json(assessments)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    axum::Json(draft): axum::Json<AssessmentDraft>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.update(&AssessmentId(assessment_id), draft) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.delete(&AssessmentId(assessment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn corroborate_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(draft): axum::Json<AssessmentDraft>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || service.corroborate(draft)).await;

    match outcome {
        Ok(Ok(outcome)) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join_error) => {
            let payload = json!({
                "error": format!("corroboration task failed: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn prioritize_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(query): axum::Json<PrioritizationQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.prioritize(query.owner.as_deref(), &query.request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn catalog_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog().clone())).into_response()
}

pub(crate) fn status_for(error: &AssessmentServiceError) -> StatusCode {
    match error {
        AssessmentServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AssessmentServiceError::Corroboration(CorroborationError::Disabled) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        AssessmentServiceError::Corroboration(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = status_for(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
