use crate::dtos::{nullable, restaurant::RestaurantRef, user::UserRef};
use chrono::{DateTime, Utc};
use database::services::reservation::ReservationView;
use models::reservation::ReservationFields;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: Uuid,
    pub user: UserRef,
    pub restaurant: RestaurantRef,
    pub reservation_date: DateTime<Utc>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationView> for ReservationResponse {
    fn from(view: ReservationView) -> Self {
        let ReservationView {
            reservation,
            restaurant,
            user,
        } = view;

        Self {
            id: reservation.id,
            user: user
                .map(UserRef::contact)
                .unwrap_or_else(|| UserRef::id(reservation.user_id)),
            restaurant: restaurant
                .map(RestaurantRef::with_hours)
                .unwrap_or_else(|| RestaurantRef::id(reservation.restaurant_id)),
            reservation_date: reservation.reservation_date,
            details: reservation.details,
            created_at: reservation.created_at,
        }
    }
}

/// Create or partial-update body
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[schema(example = "2026-06-01T19:00:00Z")]
    pub reservation_date: Option<DateTime<Utc>>,
    /// Free-form booking details such as party size; `null` clears them
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Option<Value>>,
}

impl From<ReservationRequest> for ReservationFields {
    fn from(req: ReservationRequest) -> Self {
        Self {
            reservation_date: req.reservation_date,
            details: req.details,
        }
    }
}
