use chrono::{DateTime, Utc};
use database::entities::restaurants;
use models::restaurant::RestaurantFields;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const MAX_PER_PAGE: u64 = 100;
/// Highest page whose row offset still fits a signed 64-bit query parameter
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_time: String,
    pub close_time: String,
    pub created_at: DateTime<Utc>,
}

impl From<restaurants::Model> for RestaurantResponse {
    fn from(model: restaurants::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            tel: model.tel,
            open_time: model.open_time,
            close_time: model.close_time,
            created_at: model.created_at,
        }
    }
}

/// Restaurant as embedded in reservations and feedbacks. Opening hours are
/// only included on reservations.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRef {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
}

impl RestaurantRef {
    pub fn id(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            address: None,
            tel: None,
            open_time: None,
            close_time: None,
        }
    }

    pub fn contact(model: restaurants::Model) -> Self {
        Self {
            name: Some(model.name),
            address: Some(model.address),
            tel: Some(model.tel),
            ..Self::id(model.id)
        }
    }

    pub fn with_hours(model: restaurants::Model) -> Self {
        Self {
            open_time: Some(model.open_time.clone()),
            close_time: Some(model.close_time.clone()),
            ..Self::contact(model)
        }
    }
}

/// Create or partial-update body; absent fields keep their stored value on update
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    #[schema(example = "09:00")]
    pub open_time: Option<String>,
    #[schema(example = "22:00")]
    pub close_time: Option<String>,
}

impl From<RestaurantRequest> for RestaurantFields {
    fn from(req: RestaurantRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            tel: req.tel,
            open_time: req.open_time,
            close_time: req.close_time,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct RestaurantQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Substring match on the restaurant name
    pub search: Option<String>,
}

impl RestaurantQueryParams {
    /// Page numbers start at 1 and page sizes are capped
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.clamp(1, MAX_PAGE),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            search: self.search,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}
