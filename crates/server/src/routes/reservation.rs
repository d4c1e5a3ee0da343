use crate::{
    auth::CurrentActor,
    dtos::{
        envelope::{ApiResponse, Empty, Envelope, created, ok},
        reservation::{ReservationRequest, ReservationResponse},
    },
    error::ApiError,
    extract::{AppJson, AppPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::reservation::{ReservationService, ReservationView};
use uuid::Uuid;

fn list(views: Vec<ReservationView>) -> Envelope<Vec<ReservationResponse>> {
    Json(ApiResponse::list(
        views.into_iter().map(Into::into).collect(),
    ))
}

/// List reservations: all of them for admins, the caller's own otherwise
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    responses(
        (status = 200, description = "Enveloped list with `count`", body = [ReservationResponse]),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn get_reservations(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Envelope<Vec<ReservationResponse>>, ApiError> {
    Ok(list(
        ReservationService::get_reservations(&state.db, &actor).await?,
    ))
}

/// List reservations at one restaurant, scoped like the full listing
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/reservations",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Enveloped list with `count`", body = [ReservationResponse]),
        (status = 404, description = "Restaurant not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn get_restaurant_reservations(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(restaurant_id): AppPath<Uuid>,
) -> Result<Envelope<Vec<ReservationResponse>>, ApiError> {
    Ok(list(
        ReservationService::get_reservations_for_restaurant(&state.db, &actor, restaurant_id)
            .await?,
    ))
}

/// Every reservation with the booking user's contact details (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/reservations/admin/all",
    responses(
        (status = 200, description = "Enveloped list with `count`", body = [ReservationResponse]),
        (status = 403, description = "Caller is not an admin")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn get_all_reservations(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Envelope<Vec<ReservationResponse>>, ApiError> {
    Ok(list(
        ReservationService::get_all_reservations(&state.db, &actor).await?,
    ))
}

/// Get a specific reservation by ID
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation found", body = ReservationResponse),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    _actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<ReservationResponse>, ApiError> {
    let view = ReservationService::get_reservation_by_id(&state.db, id).await?;
    Ok(ok(view.into()))
}

/// Book a table; non-admins may hold at most three reservations
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/reservations",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "Invalid body, unknown restaurant or quota reached"),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(restaurant_id): AppPath<Uuid>,
    AppJson(body): AppJson<ReservationRequest>,
) -> Result<(StatusCode, Envelope<ReservationResponse>), ApiError> {
    let reservation =
        ReservationService::create_reservation(&state.db, &actor, restaurant_id, body.into())
            .await?;
    let view = ReservationService::get_reservation_by_id(&state.db, reservation.id).await?;
    Ok(created(view.into()))
}

/// Update a reservation (owner or admin)
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationResponse),
        (status = 401, description = "Caller neither owns the reservation nor is an admin"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ReservationRequest>,
) -> Result<Envelope<ReservationResponse>, ApiError> {
    ReservationService::update_reservation(&state.db, &actor, id, body.into()).await?;
    let view = ReservationService::get_reservation_by_id(&state.db, id).await?;
    Ok(ok(view.into()))
}

/// Delete a reservation (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = Empty),
        (status = 401, description = "Caller neither owns the reservation nor is an admin"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<Empty>, ApiError> {
    ReservationService::delete_reservation(&state.db, &actor, id).await?;
    Ok(ok(Empty {}))
}

/// Update any reservation (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/reservations/admin/{id}",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn admin_update_reservation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ReservationRequest>,
) -> Result<Envelope<ReservationResponse>, ApiError> {
    ReservationService::update_reservation_as_admin(&state.db, &actor, id, body.into()).await?;
    let view = ReservationService::get_reservation_by_id(&state.db, id).await?;
    Ok(ok(view.into()))
}

/// Delete any reservation (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/admin/{id}",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = Empty),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn admin_delete_reservation(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<Empty>, ApiError> {
    ReservationService::delete_reservation_as_admin(&state.db, &actor, id).await?;
    Ok(ok(Empty {}))
}
