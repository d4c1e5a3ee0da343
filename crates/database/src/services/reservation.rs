use crate::{
    entities::{reservations, restaurants, users},
    error::{ServiceError, ServiceResult},
    services::{restaurant::RestaurantService, user::UserService},
};
use chrono::Utc;
use log::debug;
use models::{Actor, PolicyError, policy, reservation::ReservationFields};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

/// A reservation with the records it points at
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationView {
    pub reservation: reservations::Model,
    pub restaurant: Option<restaurants::Model>,
    pub user: Option<users::Model>,
}

pub struct ReservationService;

impl ReservationService {
    /// Everything for admins, only their own bookings for everyone else
    pub async fn get_reservations(
        db: &DatabaseConnection,
        actor: &Actor,
    ) -> ServiceResult<Vec<ReservationView>> {
        Self::query(db, Self::visible_to(actor), false).await
    }

    /// Bookings at one restaurant, scoped the same way as [`Self::get_reservations`]
    pub async fn get_reservations_for_restaurant(
        db: &DatabaseConnection,
        actor: &Actor,
        restaurant_id: Uuid,
    ) -> ServiceResult<Vec<ReservationView>> {
        RestaurantService::get_restaurant_by_id(db, restaurant_id).await?;

        let condition = Self::visible_to(actor)
            .add(reservations::Column::RestaurantId.eq(restaurant_id));
        Self::query(db, condition, false).await
    }

    /// Admin listing, enriched with the booking user as well
    pub async fn get_all_reservations(
        db: &DatabaseConnection,
        actor: &Actor,
    ) -> ServiceResult<Vec<ReservationView>> {
        policy::ensure_admin(actor)?;
        Self::query(db, Condition::all(), true).await
    }

    pub async fn get_reservation_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> ServiceResult<ReservationView> {
        Self::query(db, Condition::all().add(reservations::Column::Id.eq(id)), false)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Reservation", id))
    }

    /// Books a table for `actor`.
    ///
    /// The actor's user row is locked for the rest of the transaction, so two
    /// concurrent bookings by the same user cannot both pass the quota check.
    pub async fn create_reservation(
        db: &DatabaseConnection,
        actor: &Actor,
        restaurant_id: Uuid,
        fields: ReservationFields,
    ) -> ServiceResult<reservations::Model> {
        let valid = fields.validate()?;

        let txn = db.begin().await?;

        if RestaurantService::find(&txn, restaurant_id)
            .await?
            .is_none()
        {
            return Err(PolicyError::RestaurantMissing(restaurant_id).into());
        }

        users::Entity::find_by_id(actor.id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor.id))?;

        let existing = reservations::Entity::find()
            .filter(reservations::Column::UserId.eq(actor.id))
            .count(&txn)
            .await?;
        if let Err(err) = policy::ensure_can_reserve(actor, existing) {
            debug!("Rejected booking by {}: {existing} already held", actor.id);
            return Err(err.into());
        }

        let reservation = reservations::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(actor.id),
            restaurant_id: Set(restaurant_id),
            reservation_date: Set(valid.reservation_date),
            details: Set(valid.details),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(reservation)
    }

    /// Owner-or-admin partial update
    pub async fn update_reservation(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        patch: ReservationFields,
    ) -> ServiceResult<reservations::Model> {
        let existing = Self::find(db, id).await?;
        policy::ensure_can_modify(actor, &existing, "update", "reservation")?;

        Self::apply(db, existing, patch).await
    }

    /// Owner-or-admin delete
    pub async fn delete_reservation(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> ServiceResult<()> {
        let existing = Self::find(db, id).await?;
        policy::ensure_can_modify(actor, &existing, "delete", "reservation")?;

        existing.delete(db).await?;
        Ok(())
    }

    /// Admin-only update; owning the reservation does not qualify
    pub async fn update_reservation_as_admin(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        patch: ReservationFields,
    ) -> ServiceResult<reservations::Model> {
        policy::ensure_admin(actor)?;
        let existing = Self::find(db, id).await?;

        Self::apply(db, existing, patch).await
    }

    /// Admin-only delete; owning the reservation does not qualify
    pub async fn delete_reservation_as_admin(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> ServiceResult<()> {
        policy::ensure_admin(actor)?;
        let existing = Self::find(db, id).await?;

        existing.delete(db).await?;
        Ok(())
    }

    async fn find(db: &DatabaseConnection, id: Uuid) -> ServiceResult<reservations::Model> {
        reservations::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reservation", id))
    }

    async fn apply(
        db: &DatabaseConnection,
        existing: reservations::Model,
        patch: ReservationFields,
    ) -> ServiceResult<reservations::Model> {
        let valid = ReservationFields::from(&existing).merge(patch).validate()?;

        let mut reservation: reservations::ActiveModel = existing.into();
        reservation.reservation_date = Set(valid.reservation_date);
        reservation.details = Set(valid.details);

        Ok(reservation.update(db).await?)
    }

    fn visible_to(actor: &Actor) -> Condition {
        if actor.is_admin() {
            Condition::all()
        } else {
            Condition::all().add(reservations::Column::UserId.eq(actor.id))
        }
    }

    async fn query(
        db: &DatabaseConnection,
        condition: Condition,
        with_users: bool,
    ) -> ServiceResult<Vec<ReservationView>> {
        let rows = reservations::Entity::find()
            .filter(condition)
            .order_by_asc(reservations::Column::CreatedAt)
            .find_also_related(restaurants::Entity)
            .all(db)
            .await?;

        let users = if with_users {
            UserService::find_many(db, rows.iter().map(|(r, _)| r.user_id)).await?
        } else {
            Default::default()
        };

        Ok(rows
            .into_iter()
            .map(|(reservation, restaurant)| ReservationView {
                user: users.get(&reservation.user_id).cloned(),
                reservation,
                restaurant,
            })
            .collect())
    }
}
