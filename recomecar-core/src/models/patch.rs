//! Field-presence wrapper for partial updates.

use serde::{Deserialize, Deserializer};

/// Distinguishes "field absent from the payload" from "field explicitly null".
///
/// A plain `Option<T>` cannot make that distinction: both an omitted key and
/// a JSON `null` deserialize to `None`. Update payloads wrap every field in
/// `Patch<T>` instead; `#[serde(default)]` yields [`Patch::Missing`] for an
/// omitted key, and the `Deserialize` impl below maps `null` to
/// [`Patch::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Field was not present in the payload; the stored value is untouched.
    #[default]
    Missing,
    /// Field was explicitly `null`; the stored value is cleared.
    Null,
    /// Field was present with a value; the stored value is overwritten.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// `None` when the field should not be touched; `Some(new_value)` when it
    /// should be written, with `new_value == None` for an explicit null.
    pub fn as_set(&self) -> Option<Option<&T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(value) => Some(Some(value)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        field: Patch<String>,
    }

    #[test]
    fn omitted_key_is_missing() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.field, Patch::Missing);
    }

    #[test]
    fn explicit_null_is_null() {
        let probe: Probe = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(probe.field, Patch::Null);
    }

    #[test]
    fn value_is_kept() {
        let probe: Probe = serde_json::from_str(r#"{"field": "x"}"#).unwrap();
        assert_eq!(probe.field, Patch::Value("x".to_string()));
    }

    #[test]
    fn as_set_maps_the_three_states() {
        assert_eq!(Patch::<i64>::Missing.as_set(), None);
        assert_eq!(Patch::<i64>::Null.as_set(), Some(None));
        assert_eq!(Patch::Value(9).as_set(), Some(Some(&9)));
    }
}
