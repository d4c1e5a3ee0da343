use crate::{
    entities::{feedbacks, reservations, restaurants},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use models::{
    Actor, PolicyError, policy,
    restaurant::{RestaurantFields, ValidRestaurant},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

/// What a restaurant deletion took with it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub reservations: u64,
    pub feedbacks: u64,
}

pub struct RestaurantService;

impl RestaurantService {
    /// Query restaurants with pagination and an optional name filter
    pub async fn get_restaurants_paginated(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<String>,
    ) -> ServiceResult<(Vec<restaurants::Model>, u64)> {
        let mut query = restaurants::Entity::find().order_by_asc(restaurants::Column::Name);

        if let Some(search) = search
            && !search.trim().is_empty()
        {
            query = query.filter(restaurants::Column::Name.contains(search.trim()));
        }

        let total_items = query.clone().count(db).await?;
        let per_page = per_page.max(1);
        // The row offset must stay within a signed 64-bit query parameter
        let page = page.clamp(1, i64::MAX as u64 / per_page);
        let paginator = query.paginate(db, per_page);
        let restaurants = paginator.fetch_page(page - 1).await?; // SeaORM uses 0-based pages

        Ok((restaurants, total_items))
    }

    pub async fn get_restaurant_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> ServiceResult<restaurants::Model> {
        Self::find(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Restaurant", id))
    }

    pub(crate) async fn find<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> ServiceResult<Option<restaurants::Model>> {
        Ok(restaurants::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn create_restaurant(
        db: &DatabaseConnection,
        actor: &Actor,
        fields: RestaurantFields,
    ) -> ServiceResult<restaurants::Model> {
        policy::ensure_admin(actor)?;
        let valid = fields.validate()?;
        Self::ensure_name_free(db, &valid, None).await?;

        let restaurant = restaurants::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(valid.name),
            address: Set(valid.address),
            tel: Set(valid.tel),
            open_time: Set(valid.open_time),
            close_time: Set(valid.close_time),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        Ok(restaurant)
    }

    /// Partial update; the merged record is validated as a whole before saving
    pub async fn update_restaurant(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        patch: RestaurantFields,
    ) -> ServiceResult<restaurants::Model> {
        policy::ensure_admin(actor)?;
        let existing = Self::get_restaurant_by_id(db, id).await?;

        let valid = RestaurantFields::from(existing.clone())
            .merge(patch)
            .validate()?;
        Self::ensure_name_free(db, &valid, Some(id)).await?;

        let mut restaurant: restaurants::ActiveModel = existing.into();
        restaurant.name = Set(valid.name);
        restaurant.address = Set(valid.address);
        restaurant.tel = Set(valid.tel);
        restaurant.open_time = Set(valid.open_time);
        restaurant.close_time = Set(valid.close_time);

        Ok(restaurant.update(db).await?)
    }

    /// Deletes a restaurant together with every reservation and feedback
    /// that references it. Dependents go first and the whole sequence shares
    /// one transaction, so a failure leaves nothing orphaned.
    pub async fn delete_restaurant(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> ServiceResult<CascadeSummary> {
        policy::ensure_admin(actor)?;

        let txn = db.begin().await?;

        let restaurant = Self::find(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Restaurant", id))?;

        info!("Reservations being removed from restaurant {id}");
        let reservations = reservations::Entity::delete_many()
            .filter(reservations::Column::RestaurantId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let feedbacks = feedbacks::Entity::delete_many()
            .filter(feedbacks::Column::RestaurantId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        restaurant.delete(&txn).await?;
        txn.commit().await?;

        info!(
            "Deleted restaurant {id} with {reservations} reservations and {feedbacks} feedbacks"
        );
        Ok(CascadeSummary {
            reservations,
            feedbacks,
        })
    }

    async fn ensure_name_free(
        db: &DatabaseConnection,
        valid: &ValidRestaurant,
        except: Option<Uuid>,
    ) -> ServiceResult<()> {
        let mut query =
            restaurants::Entity::find().filter(restaurants::Column::Name.eq(&valid.name));
        if let Some(id) = except {
            query = query.filter(restaurants::Column::Id.ne(id));
        }

        if query.count(db).await? > 0 {
            return Err(PolicyError::Validation(format!(
                "Restaurant name {} is already taken",
                valid.name
            ))
            .into());
        }

        Ok(())
    }
}
