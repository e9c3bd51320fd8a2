pub mod crew_member;
pub mod pirate_group;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent JSON key from an explicit `null` in patch
/// payloads: missing stays `None`, `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
