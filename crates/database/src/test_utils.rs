use crate::entities::{restaurants, users};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use models::{Actor, Role};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory database with every migration applied
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // One connection, otherwise each pooled connection gets its own empty database
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn seed_user(db: &DatabaseConnection, role: Role) -> Actor {
    let id = Uuid::new_v4();

    users::ActiveModel {
        id: Set(id),
        subject: Set(format!("subject-{id}")),
        name: Set(format!("user {id}")),
        email: Set(format!("{id}@example.com")),
        tel: Set(Some("0800000000".to_string())),
        role: Set(role),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    Actor::new(id, role)
}

pub async fn seed_restaurant(db: &DatabaseConnection, name: &str) -> restaurants::Model {
    restaurants::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        address: Set("1 Main St".to_string()),
        tel: Set("0812345678".to_string()),
        open_time: Set("09:00".to_string()),
        close_time: Set("22:00".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap()
}
