use crate::{
    auth::CurrentActor,
    dtos::{
        envelope::{ApiResponse, Empty, Envelope, created, ok},
        feedback::{FeedbackRequest, FeedbackResponse},
    },
    error::ApiError,
    extract::{AppJson, AppPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::feedback::{FeedbackService, FeedbackView};
use uuid::Uuid;

fn list(views: Vec<FeedbackView>) -> Envelope<Vec<FeedbackResponse>> {
    Json(ApiResponse::list(
        views.into_iter().map(Into::into).collect(),
    ))
}

/// List every feedback
#[utoipa::path(
    get,
    path = "/api/v1/feedbacks",
    responses(
        (status = 200, description = "Enveloped list with `count`", body = [FeedbackResponse]),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn get_feedbacks(
    State(state): State<AppState>,
    _actor: CurrentActor,
) -> Result<Envelope<Vec<FeedbackResponse>>, ApiError> {
    Ok(list(FeedbackService::get_feedbacks(&state.db).await?))
}

/// List the feedbacks left for one restaurant
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/feedbacks",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Enveloped list with `count`", body = [FeedbackResponse]),
        (status = 404, description = "Restaurant not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn get_restaurant_feedbacks(
    State(state): State<AppState>,
    _actor: CurrentActor,
    AppPath(restaurant_id): AppPath<Uuid>,
) -> Result<Envelope<Vec<FeedbackResponse>>, ApiError> {
    Ok(list(
        FeedbackService::get_feedbacks_for_restaurant(&state.db, restaurant_id).await?,
    ))
}

/// Get a specific feedback by ID
#[utoipa::path(
    get,
    path = "/api/v1/feedbacks/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback ID")
    ),
    responses(
        (status = 200, description = "Feedback found", body = FeedbackResponse),
        (status = 404, description = "Feedback not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn get_feedback(
    State(state): State<AppState>,
    _actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<FeedbackResponse>, ApiError> {
    let view = FeedbackService::get_feedback_by_id(&state.db, id).await?;
    Ok(ok(view.into()))
}

/// Rate a restaurant; non-admins need a reservation there first
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/feedbacks",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback created", body = FeedbackResponse),
        (status = 400, description = "Invalid rating, unknown restaurant or no prior reservation"),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(restaurant_id): AppPath<Uuid>,
    AppJson(body): AppJson<FeedbackRequest>,
) -> Result<(StatusCode, Envelope<FeedbackResponse>), ApiError> {
    let feedback =
        FeedbackService::create_feedback(&state.db, &actor, restaurant_id, body.into()).await?;
    let view = FeedbackService::get_feedback_by_id(&state.db, feedback.id).await?;
    Ok(created(view.into()))
}

/// Update a feedback (owner or admin)
#[utoipa::path(
    put,
    path = "/api/v1/feedbacks/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback ID")
    ),
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback updated", body = FeedbackResponse),
        (status = 400, description = "Invalid rating"),
        (status = 401, description = "Caller neither wrote the feedback nor is an admin"),
        (status = 404, description = "Feedback not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn update_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<FeedbackRequest>,
) -> Result<Envelope<FeedbackResponse>, ApiError> {
    FeedbackService::update_feedback(&state.db, &actor, id, body.into()).await?;
    let view = FeedbackService::get_feedback_by_id(&state.db, id).await?;
    Ok(ok(view.into()))
}

/// Delete a feedback (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/feedbacks/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback ID")
    ),
    responses(
        (status = 200, description = "Feedback deleted", body = Empty),
        (status = 401, description = "Caller neither wrote the feedback nor is an admin"),
        (status = 404, description = "Feedback not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Feedbacks"
)]
pub async fn delete_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<Empty>, ApiError> {
    FeedbackService::delete_feedback(&state.db, &actor, id).await?;
    Ok(ok(Empty {}))
}
