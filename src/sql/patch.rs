//! Absence-aware field wrapper for partial updates.

use serde::{Deserialize, Deserializer};

/// State of one field in a partial-update payload. A field the client never
/// sent is [`Patch::Absent`] and must be left untouched; an explicit JSON
/// `null` is [`Patch::Null`] and clears the column.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

// `Option::deserialize` only ever sees fields that are present, so `None`
// here means an explicit null; `Absent` comes from `#[serde(default)]`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Null,
            Some(v) => Patch::Value(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        name: Patch<String>,
        rank: Patch<i32>,
    }

    #[test]
    fn missing_field_is_absent() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.name.is_absent());
        assert!(p.rank.is_absent());
    }

    #[test]
    fn explicit_null_is_null_not_absent() {
        let p: Payload = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(p.name, Patch::Null);
        assert!(p.rank.is_absent());
    }

    #[test]
    fn present_value_is_carried() {
        let p: Payload = serde_json::from_str(r#"{"name": "ada", "rank": 3}"#).unwrap();
        assert_eq!(p.name, Patch::Value("ada".to_string()));
        assert_eq!(p.rank, Patch::Value(3));
    }
}
