use crate::error::PolicyError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Longest restaurant name accepted, in characters
pub const MAX_NAME_LEN: usize = 50;

lazy_static! {
    /// 24-hour `H:MM` or `HH:MM`
    static ref TIME_OF_DAY: Regex = Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

pub fn is_valid_time(value: &str) -> bool {
    TIME_OF_DAY.is_match(value)
}

/// Restaurant fields as submitted; every field may be absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// A restaurant that passed every field constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidRestaurant {
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_time: String,
    pub close_time: String,
}

impl RestaurantFields {
    /// Overlay `patch` on top of these fields, keeping ours where the patch is silent
    pub fn merge(self, patch: RestaurantFields) -> Self {
        Self {
            name: patch.name.or(self.name),
            address: patch.address.or(self.address),
            tel: patch.tel.or(self.tel),
            open_time: patch.open_time.or(self.open_time),
            close_time: patch.close_time.or(self.close_time),
        }
    }

    /// Checks every field and reports all failures at once
    pub fn validate(self) -> Result<ValidRestaurant, PolicyError> {
        let mut errors = Vec::new();

        let name = required(self.name, "Please add a name", &mut errors);
        if name.chars().count() > MAX_NAME_LEN {
            errors.push(format!(
                "Name cannot be more than {MAX_NAME_LEN} characters"
            ));
        }

        let address = required(self.address, "Please add an address", &mut errors);
        let tel = required(self.tel, "Please add a telephone number", &mut errors);
        let open_time = time_field(self.open_time, "Please add open time", &mut errors);
        let close_time = time_field(self.close_time, "Please add close time", &mut errors);

        PolicyError::from_messages(errors)?;

        Ok(ValidRestaurant {
            name,
            address,
            tel,
            open_time,
            close_time,
        })
    }
}

impl From<ValidRestaurant> for RestaurantFields {
    fn from(valid: ValidRestaurant) -> Self {
        Self {
            name: Some(valid.name),
            address: Some(valid.address),
            tel: Some(valid.tel),
            open_time: Some(valid.open_time),
            close_time: Some(valid.close_time),
        }
    }
}

fn required(value: Option<String>, missing: &str, errors: &mut Vec<String>) -> String {
    match value.map(|v| v.trim().to_owned()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.push(missing.to_owned());
            String::new()
        }
    }
}

fn time_field(value: Option<String>, missing: &str, errors: &mut Vec<String>) -> String {
    let before = errors.len();
    let value = required(value, missing, errors);

    if errors.len() == before && !is_valid_time(&value) {
        errors.push(format!("{value} is not a valid time"));
    }

    value
}
