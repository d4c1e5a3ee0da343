use models::PolicyError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("{entity} not found with id of {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("database error: {0}")]
    Db(DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        // A lost race on a unique column is a field error, not an outage
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Policy(PolicyError::Validation(
                "Duplicate field value entered".to_string(),
            )),
            _ => Self::Db(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
