use crate::error::PolicyError;
use serde::Serialize;

pub const MIN_RATING: i16 = 0;
pub const MAX_RATING: i16 = 5;

/// A whole-number rating within `MIN_RATING..=MAX_RATING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub fn value(self) -> i16 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = PolicyError;

    fn try_from(raw: f64) -> Result<Self, Self::Error> {
        if raw < f64::from(MIN_RATING) || raw > f64::from(MAX_RATING) {
            return Err(PolicyError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        if raw.fract() != 0.0 {
            return Err(PolicyError::Validation(
                "Rating must be a whole number".to_string(),
            ));
        }

        Ok(Self(raw as i16))
    }
}

/// Feedback fields as submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFields {
    pub rating: Option<f64>,
    /// `Some(None)` clears a stored description
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidFeedback {
    pub rating: Rating,
    pub description: Option<String>,
}

impl FeedbackFields {
    pub fn merge(self, patch: FeedbackFields) -> Self {
        Self {
            rating: patch.rating.or(self.rating),
            description: patch.description.or(self.description),
        }
    }

    pub fn validate(self) -> Result<ValidFeedback, PolicyError> {
        let rating = self
            .rating
            .ok_or_else(|| PolicyError::Validation("Please provide a rating".to_string()))?;

        Ok(ValidFeedback {
            rating: Rating::try_from(rating)?,
            description: self.description.flatten(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds_are_inclusive() {
        assert_eq!(Rating::try_from(0.0).unwrap().value(), 0);
        assert_eq!(Rating::try_from(5.0).unwrap().value(), 5);
    }

    #[test]
    fn test_rating_out_of_range() {
        for raw in [-1.0, 5.5, 6.0, 100.0] {
            assert_eq!(
                Rating::try_from(raw),
                Err(PolicyError::Validation(
                    "Rating must be between 0 and 5".to_string()
                ))
            );
        }
    }

    #[test]
    fn test_rating_must_be_whole() {
        assert_eq!(
            Rating::try_from(3.5),
            Err(PolicyError::Validation(
                "Rating must be a whole number".to_string()
            ))
        );
    }

    #[test]
    fn test_rating_is_required() {
        let fields = FeedbackFields {
            rating: None,
            description: Some(Some("Great broth".to_string())),
        };

        assert_eq!(
            fields.validate(),
            Err(PolicyError::Validation(
                "Please provide a rating".to_string()
            ))
        );
    }

    #[test]
    fn test_merge_revalidates_rating() {
        let existing = FeedbackFields {
            rating: Some(4.0),
            description: Some(Some("Good".to_string())),
        };

        let merged = existing.clone().merge(FeedbackFields {
            description: Some(Some("Better".to_string())),
            ..Default::default()
        });
        let valid = merged.validate().unwrap();
        assert_eq!(valid.rating.value(), 4);
        assert_eq!(valid.description.as_deref(), Some("Better"));

        let bad = existing.merge(FeedbackFields {
            rating: Some(6.0),
            ..Default::default()
        });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_merge_can_clear_description() {
        let existing = FeedbackFields {
            rating: Some(4.0),
            description: Some(Some("Good".to_string())),
        };

        let cleared = existing.merge(FeedbackFields {
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(cleared.validate().unwrap().description, None);
    }
}
