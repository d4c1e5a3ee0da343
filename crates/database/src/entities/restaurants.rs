use models::restaurant::{RestaurantFields, ValidRestaurant};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_time: String, // HH:MM
    pub close_time: String,
    pub created_at: DateTimeUtc,
}

// Reservations and feedbacks are found by foreign key, never stored here
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
    #[sea_orm(has_many = "super::feedbacks::Entity")]
    Feedbacks,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::feedbacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedbacks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RestaurantFields {
    fn from(model: Model) -> Self {
        ValidRestaurant {
            name: model.name,
            address: model.address,
            tel: model.tel,
            open_time: model.open_time,
            close_time: model.close_time,
        }
        .into()
    }
}
