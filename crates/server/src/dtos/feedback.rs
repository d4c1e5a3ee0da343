use crate::dtos::{nullable, restaurant::RestaurantRef, user::UserRef};
use chrono::{DateTime, Utc};
use database::services::feedback::FeedbackView;
use models::feedback::FeedbackFields;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub user: UserRef,
    pub restaurant: RestaurantRef,
    pub rating: i16,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackView> for FeedbackResponse {
    fn from(view: FeedbackView) -> Self {
        let FeedbackView {
            feedback,
            restaurant,
            user,
        } = view;

        Self {
            id: feedback.id,
            user: user
                .map(UserRef::name)
                .unwrap_or_else(|| UserRef::id(feedback.user_id)),
            restaurant: restaurant
                .map(RestaurantRef::contact)
                .unwrap_or_else(|| RestaurantRef::id(feedback.restaurant_id)),
            rating: feedback.rating,
            description: feedback.description,
            created_at: feedback.created_at,
        }
    }
}

/// Create or partial-update body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    #[schema(example = 4)]
    pub rating: Option<f64>,
    /// `null` removes an existing description
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl From<FeedbackRequest> for FeedbackFields {
    fn from(req: FeedbackRequest) -> Self {
        Self {
            rating: req.rating,
            description: req.description,
        }
    }
}
