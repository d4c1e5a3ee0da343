use axum::{
    Json,
    extract::{
        Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use database::ServiceError;
use models::PolicyError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No verified identity reached the handler
    #[error("Not authorized to access this route")]
    Unauthenticated,

    /// The token is valid but its subject has no user record yet
    #[error("Please register before using this route")]
    Unregistered,

    /// The request could not be decoded
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A bare status produced by a layer rather than a handler
    #[error("{}", .0.canonical_reason().unwrap_or("Request failed"))]
    Status(StatusCode),
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        Self::Service(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::Unregistered => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Status(status) => *status,
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Service(ServiceError::Policy(policy)) => match policy {
                PolicyError::NotAuthorized { .. } => StatusCode::UNAUTHORIZED,
                PolicyError::AdminOnly(_) => StatusCode::FORBIDDEN,
                PolicyError::Validation(_)
                | PolicyError::QuotaExceeded { .. }
                | PolicyError::NoPriorReservation
                | PolicyError::RestaurantMissing(_) => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Service(ServiceError::Policy(policy)) = &self
            && policy.is_business_rule()
        {
            log::debug!("Refused by business rule: {policy}");
        }

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("{self}");
            "Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Rewrites error responses that did not come from a handler (auth and
/// timeout layers answer with an empty body) into the JSON envelope.
pub async fn envelope_bare_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response;
    }

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated.into_response(),
        status => ApiError::Status(status).into_response(),
    }
}
