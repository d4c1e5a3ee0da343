use thiserror::Error;
use uuid::Uuid;

/// Why a request was refused before anything was written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// One or more field constraints failed; messages are joined with ", "
    #[error("{0}")]
    Validation(String),

    /// The actor is neither the owner nor an admin
    #[error("User {actor} is not authorized to {action} this {entity}")]
    NotAuthorized {
        actor: Uuid,
        action: &'static str,
        entity: &'static str,
    },

    /// The route is reserved for admins
    #[error("User role {0} is not authorized to access this route")]
    AdminOnly(crate::role::Role),

    #[error("{actor} has already booked {limit} reservations")]
    QuotaExceeded { actor: Uuid, limit: u64 },

    #[error("Cannot add feedback without a prior reservation")]
    NoPriorReservation,

    #[error("Cannot find Restaurant with id of {0}")]
    RestaurantMissing(Uuid),
}

impl PolicyError {
    pub(crate) fn from_messages(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self::Validation(messages.join(", ")))
        }
    }

    /// Whether this is a business-rule refusal rather than a permission or field error
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded { .. } | Self::NoPriorReservation | Self::RestaurantMissing(_)
        )
    }
}
