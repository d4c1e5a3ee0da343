use crate::error::PolicyError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Booking fields as submitted; owner and restaurant come from the request context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFields {
    pub reservation_date: Option<DateTime<Utc>>,
    /// Extra booking data carried through untouched. `Some(None)` clears it.
    pub details: Option<Option<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidReservation {
    pub reservation_date: DateTime<Utc>,
    pub details: Option<Value>,
}

impl ReservationFields {
    pub fn merge(self, patch: ReservationFields) -> Self {
        Self {
            reservation_date: patch.reservation_date.or(self.reservation_date),
            details: patch.details.or(self.details),
        }
    }

    pub fn validate(self) -> Result<ValidReservation, PolicyError> {
        let mut errors = Vec::new();
        let details = self.details.flatten();

        if self.reservation_date.is_none() {
            errors.push("Please add a reservation date".to_string());
        }
        if let Some(details) = &details
            && !details.is_object()
        {
            errors.push("Reservation details must be an object".to_string());
        }

        PolicyError::from_messages(errors)?;

        Ok(ValidReservation {
            reservation_date: self.reservation_date.unwrap_or_default(),
            details,
        })
    }
}
