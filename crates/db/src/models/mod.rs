pub mod article;
pub mod shop;

use serde::{Deserialize, Deserializer};

/// Deserialize a PUT body field that distinguishes absent from `null`.
///
/// Absent fields fall back to the `#[serde(default)]` of `None`; a present
/// field (including an explicit `null`) deserializes to `Some(inner)`. Used
/// with `Option<Option<T>>` so `null` clears a nullable column while absence
/// leaves it unchanged.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
