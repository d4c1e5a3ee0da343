use crate::{entities::users, error::ServiceResult};
use chrono::Utc;
use models::{PolicyError, Role, user::Registration};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct UserService;

impl UserService {
    pub async fn find_by_subject(
        db: &DatabaseConnection,
        subject: &str,
    ) -> ServiceResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Subject.eq(subject))
            .one(db)
            .await?)
    }

    /// Creates the user row for a token subject that has not registered yet
    pub async fn register(
        db: &DatabaseConnection,
        subject: &str,
        registration: Registration,
        role: Role,
    ) -> ServiceResult<users::Model> {
        let valid = registration.validate()?;

        if Self::find_by_subject(db, subject).await?.is_some() {
            return Err(PolicyError::Validation("User already registered".to_string()).into());
        }

        let email_taken = users::Entity::find()
            .filter(users::Column::Email.eq(&valid.email))
            .count(db)
            .await?
            > 0;
        if email_taken {
            return Err(PolicyError::Validation(format!(
                "Email {} is already registered",
                valid.email
            ))
            .into());
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject.to_owned()),
            name: Set(valid.name),
            email: Set(valid.email),
            tel: Set(valid.tel),
            role: Set(role),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        log::info!("Registered {} as {} ({})", user.id, user.role, user.email);
        Ok(user)
    }

    /// Batch fetch users by id, keyed for joining onto their records
    pub(crate) async fn find_many<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = Uuid>,
    ) -> ServiceResult<HashMap<Uuid, users::Model>> {
        let ids: HashSet<Uuid> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = users::Entity::find()
            .filter(users::Column::Id.is_in(ids))
            .all(db)
            .await?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ServiceError, test_utils::setup};

    fn registration(name: &str, email: &str) -> Registration {
        Registration {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            tel: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_find() {
        let db = setup().await;

        let mai = registration("Mai", "mai@example.com");
        let user = UserService::register(&db, "sub-1", mai, Role::User)
            .await
            .unwrap();

        let found = UserService::find_by_subject(&db, "sub-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, user);
        assert_eq!(found.actor(), models::Actor::user(user.id));
    }

    #[tokio::test]
    async fn test_register_twice_is_rejected() {
        let db = setup().await;

        let first = registration("Mai", "mai@example.com");
        UserService::register(&db, "sub-1", first, Role::User)
            .await
            .unwrap();
        let again = registration("Mai", "other@example.com");
        let err = UserService::register(&db, "sub-1", again, Role::User)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Policy(PolicyError::Validation(msg)) if msg == "User already registered"
        ));
    }

    #[tokio::test]
    async fn test_email_must_be_unique() {
        let db = setup().await;

        let mai = registration("Mai", "mai@example.com");
        UserService::register(&db, "sub-1", mai, Role::User)
            .await
            .unwrap();
        let lan = registration("Lan", "mai@example.com");
        let err = UserService::register(&db, "sub-2", lan, Role::User)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Policy(PolicyError::Validation(_))));
    }
}
