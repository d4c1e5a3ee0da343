use crate::error::PolicyError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const MAX_USER_NAME_LEN: usize = 50;

/// Registration details for the identity behind a bearer token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub tel: Option<String>,
}

impl Registration {
    pub fn validate(self) -> Result<ValidRegistration, PolicyError> {
        let mut errors = Vec::new();

        let name = self.name.map(|n| n.trim().to_owned()).unwrap_or_default();
        if name.is_empty() {
            errors.push("Please add a name".to_string());
        } else if name.chars().count() > MAX_USER_NAME_LEN {
            errors.push(format!(
                "Name cannot be more than {MAX_USER_NAME_LEN} characters"
            ));
        }

        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_default();
        if email.is_empty() {
            errors.push("Please add an email".to_string());
        } else if !EMAIL.is_match(&email) {
            errors.push("Please add a valid email".to_string());
        }

        PolicyError::from_messages(errors)?;

        Ok(ValidRegistration {
            name,
            email,
            tel: self
                .tel
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty()),
        })
    }
}
