use serde::{Deserialize, Deserializer};

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (keep current value)
/// * JSON field = null  => `Some(None)`    (clear)
/// * JSON field = value => `Some(Some(v))` (set)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}
