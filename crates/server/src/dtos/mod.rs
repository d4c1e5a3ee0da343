pub mod envelope;
pub mod feedback;
pub mod reservation;
pub mod restaurant;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` apart from an absent field. Pair with
/// `#[serde(default)]` so a missing field stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
