use crate::{
    auth::{CurrentUser, Identity},
    dtos::{
        envelope::{Envelope, created, ok},
        user::{RegisterRequest, UserResponse},
    },
    error::ApiError,
    extract::AppJson,
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use database::services::user::UserService;
use models::Role;

/// Create the user record for the bearer token's subject
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered; the body is enveloped", body = UserResponse),
        (status = 400, description = "Invalid details or already registered"),
        (status = 401, description = "Missing or invalid JWT")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Identity(subject): Identity,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Envelope<UserResponse>), ApiError> {
    let role = if state.config.is_admin_subject(&subject) {
        Role::Admin
    } else {
        Role::User
    };

    let user = UserService::register(&state.db, &subject, body.into(), role).await?;
    Ok(created(user.into()))
}

/// The registered user behind the bearer token
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user; the body is enveloped", body = UserResponse),
        (status = 401, description = "Missing JWT or not registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Envelope<UserResponse> {
    ok(user.into())
}
