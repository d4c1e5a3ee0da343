use chrono::{DateTime, Utc};
use database::entities::users;
use models::{Role, user::Registration};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            tel: req.tel,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tel: Option<String>,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            tel: model.tel,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

/// User as embedded in reservations and feedbacks. Only `id` is always
/// present; contact details appear where the listing calls for them.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

impl UserRef {
    pub fn id(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            email: None,
            tel: None,
        }
    }

    pub fn name(model: users::Model) -> Self {
        Self {
            name: Some(model.name),
            ..Self::id(model.id)
        }
    }

    pub fn contact(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: Some(model.name),
            email: Some(model.email),
            tel: model.tel,
        }
    }
}
