use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use lemon_core::AppError;
use lemon_models::{CreateFeedbackDto, Feedback, FeedbackCreated};
use tracing::instrument;

use super::service::FeedbackService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::RequireDeveloper;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Submit feedback
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackCreated),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Feedback"
)]
#[instrument(skip_all)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFeedbackDto>,
) -> Result<(StatusCode, Json<FeedbackCreated>), AppError> {
    let id = FeedbackService::submit(state.feedback.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(FeedbackCreated { id })))
}

/// List all feedback, newest first
#[utoipa::path(
    get,
    path = "/api/feedback",
    responses((status = 200, description = "All feedback", body = Vec<Feedback>)),
    tag = "Feedback"
)]
#[instrument(skip_all)]
pub async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, AppError> {
    Ok(Json(FeedbackService::list(state.feedback.as_ref()).await?))
}

/// Fetch one feedback entry
#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    params(("id" = i64, Path, description = "Feedback id")),
    responses(
        (status = 200, description = "Feedback entry", body = Feedback),
        (status = 404, description = "No such feedback", body = ErrorResponse)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Feedback>, AppError> {
    Ok(Json(FeedbackService::get(state.feedback.as_ref(), id).await?))
}

/// Mark a feedback entry as read (developers only)
#[utoipa::path(
    put,
    path = "/api/feedback/{id}",
    params(("id" = i64, Path, description = "Feedback id")),
    responses(
        (status = 200, description = "Marked read", body = Feedback),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a developer", body = ErrorResponse),
        (status = 404, description = "No such feedback", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state, _developer))]
pub async fn mark_feedback_read(
    State(state): State<AppState>,
    _developer: RequireDeveloper,
    Path(id): Path<i64>,
) -> Result<Json<Feedback>, AppError> {
    Ok(Json(FeedbackService::mark_read(state.feedback.as_ref(), id).await?))
}
