use crate::{
    auth::CurrentActor,
    dtos::{
        envelope::{ApiResponse, Empty, Envelope, PaginationMeta, created, ok},
        restaurant::{RestaurantQueryParams, RestaurantRequest, RestaurantResponse},
    },
    error::ApiError,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::restaurant::RestaurantService;
use uuid::Uuid;

/// Get paginated list of restaurants
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    params(RestaurantQueryParams),
    responses(
        (status = 200, description = "Enveloped page of restaurants with `count` and `pagination`", body = [RestaurantResponse]),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurants(
    State(state): State<AppState>,
    _actor: CurrentActor,
    AppQuery(params): AppQuery<RestaurantQueryParams>,
) -> Result<Envelope<Vec<RestaurantResponse>>, ApiError> {
    let params = params.normalized();

    let (restaurants, total_items) = RestaurantService::get_restaurants_paginated(
        &state.db,
        params.page,
        params.per_page,
        params.search,
    )
    .await?;

    let pagination = PaginationMeta::new(params.page, params.per_page, total_items);
    let data = restaurants.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::page(data, pagination)))
}

/// Get a specific restaurant by ID
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant found", body = RestaurantResponse),
        (status = 404, description = "Restaurant not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    _actor: CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<RestaurantResponse>, ApiError> {
    let restaurant = RestaurantService::get_restaurant_by_id(&state.db, id).await?;
    Ok(ok(restaurant.into()))
}

/// Add a restaurant (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Restaurants"
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppJson(body): AppJson<RestaurantRequest>,
) -> Result<(StatusCode, Envelope<RestaurantResponse>), ApiError> {
    let restaurant = RestaurantService::create_restaurant(&state.db, &actor, body.into()).await?;
    Ok(created(restaurant.into()))
}

/// Update a restaurant (admin only); omitted fields are left as they are
#[utoipa::path(
    put,
    path = "/api/v1/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Restaurant not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Restaurants"
)]
pub async fn update_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<RestaurantRequest>,
) -> Result<Envelope<RestaurantResponse>, ApiError> {
    let restaurant =
        RestaurantService::update_restaurant(&state.db, &actor, id, body.into()).await?;
    Ok(ok(restaurant.into()))
}

/// Delete a restaurant with all of its reservations and feedbacks (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/{id}",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant deleted", body = Empty),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Restaurant not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Restaurants"
)]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppPath(id): AppPath<Uuid>,
) -> Result<Envelope<Empty>, ApiError> {
    RestaurantService::delete_restaurant(&state.db, &actor, id).await?;
    Ok(ok(Empty {}))
}
