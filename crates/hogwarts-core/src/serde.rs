use serde::{Deserialize, Deserializer};

/// Treats a missing, empty, or whitespace-only query value as `None`.
///
/// `?color=&name=Gryffindor` should search by name only, so an empty
/// `color` must not turn into a filter on the empty string.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
