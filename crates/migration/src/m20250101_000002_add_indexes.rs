use crate::m20250101_000001_create_tables::{Feedbacks, Reservations};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Quota checks count bookings per user
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user_id")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        // Cascade deletes and per-restaurant listings
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_restaurant_id")
                    .table(Reservations::Table)
                    .col(Reservations::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedbacks_restaurant_id")
                    .table(Feedbacks::Table)
                    .col(Feedbacks::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedbacks_user_id")
                    .table(Feedbacks::Table)
                    .col(Feedbacks::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_feedbacks_user_id",
            "idx_feedbacks_restaurant_id",
            "idx_reservations_restaurant_id",
            "idx_reservations_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
