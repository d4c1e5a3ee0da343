use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use database::{entities::users, services::user::UserService};
use models::Actor;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The verified token subject of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

/// Copies the `sub` claim left behind by the OAuth2 layer into an [`Identity`]
pub async fn identity_from_claims(mut request: Request, next: Next) -> Response {
    let subject = request
        .extensions()
        .get::<DefaultClaims>()
        .and_then(|claims| claims.sub.as_ref().map(ToString::to_string));

    if let Some(subject) = subject {
        request.extensions_mut().insert(Identity(subject));
    }

    next.run(request).await
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

/// The registered user behind the request
pub struct CurrentUser(pub users::Model);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Identity(subject) = Identity::from_request_parts(parts, state).await?;

        UserService::find_by_subject(&state.db, &subject)
            .await?
            .map(CurrentUser)
            .ok_or(ApiError::Unregistered)
    }
}

/// Just the id and role of the registered caller, which is all the
/// authorization rules look at
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        Ok(CurrentActor(user.actor()))
    }
}
