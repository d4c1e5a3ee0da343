use crate::{
    entities::{feedbacks, reservations, restaurants, users},
    error::{ServiceError, ServiceResult},
    services::{restaurant::RestaurantService, user::UserService},
};
use chrono::Utc;
use log::debug;
use models::{Actor, PolicyError, feedback::FeedbackFields, policy};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

/// A feedback with its author and restaurant
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackView {
    pub feedback: feedbacks::Model,
    pub restaurant: Option<restaurants::Model>,
    pub user: Option<users::Model>,
}

pub struct FeedbackService;

impl FeedbackService {
    pub async fn get_feedbacks(db: &DatabaseConnection) -> ServiceResult<Vec<FeedbackView>> {
        Self::query(db, Condition::all()).await
    }

    pub async fn get_feedbacks_for_restaurant(
        db: &DatabaseConnection,
        restaurant_id: Uuid,
    ) -> ServiceResult<Vec<FeedbackView>> {
        RestaurantService::get_restaurant_by_id(db, restaurant_id).await?;
        Self::query(
            db,
            Condition::all().add(feedbacks::Column::RestaurantId.eq(restaurant_id)),
        )
        .await
    }

    pub async fn get_feedback_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> ServiceResult<FeedbackView> {
        Self::query(db, Condition::all().add(feedbacks::Column::Id.eq(id)))
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Feedback", id))
    }

    /// Rates a restaurant. Non-admins need at least one reservation there;
    /// when or whether that booking happened is not considered.
    pub async fn create_feedback(
        db: &DatabaseConnection,
        actor: &Actor,
        restaurant_id: Uuid,
        fields: FeedbackFields,
    ) -> ServiceResult<feedbacks::Model> {
        let valid = fields.validate()?;

        let txn = db.begin().await?;

        if RestaurantService::find(&txn, restaurant_id)
            .await?
            .is_none()
        {
            return Err(PolicyError::RestaurantMissing(restaurant_id).into());
        }

        if !actor.is_admin() {
            let prior = reservations::Entity::find()
                .filter(reservations::Column::UserId.eq(actor.id))
                .filter(reservations::Column::RestaurantId.eq(restaurant_id))
                .count(&txn)
                .await?;

            if let Err(err) = policy::ensure_can_leave_feedback(actor, prior) {
                debug!("Rejected feedback by {} for {restaurant_id}", actor.id);
                return Err(err.into());
            }
        }

        let feedback = feedbacks::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(actor.id),
            restaurant_id: Set(restaurant_id),
            rating: Set(valid.rating.value()),
            description: Set(valid.description),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(feedback)
    }

    /// Owner-or-admin partial update; the merged rating is re-validated
    pub async fn update_feedback(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        patch: FeedbackFields,
    ) -> ServiceResult<feedbacks::Model> {
        let existing = Self::find(db, id).await?;
        policy::ensure_can_modify(actor, &existing, "update", "feedback")?;

        let valid = FeedbackFields::from(&existing).merge(patch).validate()?;

        let mut feedback: feedbacks::ActiveModel = existing.into();
        feedback.rating = Set(valid.rating.value());
        feedback.description = Set(valid.description);

        Ok(feedback.update(db).await?)
    }

    pub async fn delete_feedback(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> ServiceResult<()> {
        let existing = Self::find(db, id).await?;
        policy::ensure_can_modify(actor, &existing, "delete", "feedback")?;

        existing.delete(db).await?;
        Ok(())
    }

    async fn find(db: &DatabaseConnection, id: Uuid) -> ServiceResult<feedbacks::Model> {
        feedbacks::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Feedback", id))
    }

    async fn query(
        db: &DatabaseConnection,
        condition: Condition,
    ) -> ServiceResult<Vec<FeedbackView>> {
        let rows = feedbacks::Entity::find()
            .filter(condition)
            .order_by_asc(feedbacks::Column::CreatedAt)
            .find_also_related(restaurants::Entity)
            .all(db)
            .await?;

        let users = UserService::find_many(db, rows.iter().map(|(f, _)| f.user_id)).await?;

        Ok(rows
            .into_iter()
            .map(|(feedback, restaurant)| FeedbackView {
                user: users.get(&feedback.user_id).cloned(),
                feedback,
                restaurant,
            })
            .collect())
    }
}
