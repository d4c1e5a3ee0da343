pub mod auth;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

use crate::{
    doc::ApiDoc,
    error::envelope_bare_errors,
    routes::{auth as auth_routes, feedback, health, reservation, restaurant, root},
    state::AppState,
};
use axum::{
    Json, Router, middleware,
    routing::{get, post, put},
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};
use utoipa::OpenApi;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Every route that acts on behalf of a user
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth_routes::register))
        .route("/auth/me", get(auth_routes::me))
        .route(
            "/restaurants",
            get(restaurant::get_restaurants).post(restaurant::create_restaurant),
        )
        .route(
            "/restaurants/{id}",
            get(restaurant::get_restaurant)
                .put(restaurant::update_restaurant)
                .delete(restaurant::delete_restaurant),
        )
        .route(
            "/restaurants/{id}/reservations",
            get(reservation::get_restaurant_reservations).post(reservation::create_reservation),
        )
        .route(
            "/restaurants/{id}/feedbacks",
            get(feedback::get_restaurant_feedbacks).post(feedback::create_feedback),
        )
        .route("/reservations", get(reservation::get_reservations))
        .route(
            "/reservations/admin/all",
            get(reservation::get_all_reservations),
        )
        .route(
            "/reservations/admin/{id}",
            put(reservation::admin_update_reservation)
                .delete(reservation::admin_delete_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservation::get_reservation)
                .put(reservation::update_reservation)
                .delete(reservation::delete_reservation),
        )
        .route("/feedbacks", get(feedback::get_feedbacks))
        .route(
            "/feedbacks/{id}",
            get(feedback::get_feedback)
                .put(feedback::update_feedback)
                .delete(feedback::delete_feedback),
        )
}

/// Builds the application router.
///
/// `protect` wraps the `/api/v1` routes with whatever establishes the
/// caller's [`auth::Identity`]; in production that is the OAuth2 layer
/// followed by [`auth::identity_from_claims`]. Error statuses from the
/// auth and timeout layers leave as the usual JSON envelope.
pub fn app(
    state: AppState,
    protect: impl FnOnce(Router<AppState>) -> Router<AppState>,
) -> Router {
    let timeout = state.config.request_timeout;

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi))
        .nest("/api/v1", protect(api_routes()))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(envelope_bare_errors))
        .layer(CompressionLayer::new())
        .with_state(state)
}
