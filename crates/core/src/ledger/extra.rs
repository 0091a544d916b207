//! Whitelisted extra metadata for entries.
//!
//! Entries may carry a small key/value map for integrations (bank import
//! tags, savings goals). The keys are whitelisted and the values restricted
//! to JSON scalars, so the column stays queryable and migrations stay sane.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::LedgerError;

/// Keys an entry's extra map may contain.
pub const ALLOWED_EXTRA_KEYS: [&str; 6] = [
    "bank_name",
    "goal_type",
    "goal_value",
    "external_ref",
    "import_id",
    "note",
];

/// Validated key/value metadata attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraFields(BTreeMap<String, Value>);

impl ExtraFields {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a key/value pair. Validation happens separately via
    /// [`ExtraFields::validate`].
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the map has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Checks that every key is whitelisted and every value is a scalar.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (key, value) in &self.0 {
            if !ALLOWED_EXTRA_KEYS.contains(&key.as_str()) {
                return Err(LedgerError::UnknownExtraKey(key.clone()));
            }
            if !matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
                return Err(LedgerError::ExtraValueNotScalar(key.clone()));
            }
        }
        Ok(())
    }
}

impl From<ExtraFields> for Value {
    fn from(extra: ExtraFields) -> Self {
        Value::Object(extra.0.into_iter().collect())
    }
}

impl TryFrom<Value> for ExtraFields {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_whitelisted_scalars_pass() {
        let mut extra = ExtraFields::new();
        extra.insert("bank_name", json!("Banco do Sul"));
        extra.insert("goal_value", json!(1500.50));
        extra.insert("note", json!("imported"));
        assert!(extra.validate().is_ok());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut extra = ExtraFields::new();
        extra.insert("favourite_color", json!("teal"));
        assert!(matches!(
            extra.validate(),
            Err(LedgerError::UnknownExtraKey(key)) if key == "favourite_color"
        ));
    }

    #[test]
    fn test_non_scalar_value_is_rejected() {
        let mut extra = ExtraFields::new();
        extra.insert("note", json!({ "nested": true }));
        assert!(matches!(
            extra.validate(),
            Err(LedgerError::ExtraValueNotScalar(key)) if key == "note"
        ));

        let mut extra = ExtraFields::new();
        extra.insert("note", json!(["a", "b"]));
        assert!(extra.validate().is_err());

        let mut extra = ExtraFields::new();
        extra.insert("note", Value::Null);
        assert!(extra.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut extra = ExtraFields::new();
        extra.insert("import_id", json!("stmt-42"));
        let value: Value = extra.clone().into();
        let back = ExtraFields::try_from(value).unwrap();
        assert_eq!(back, extra);
    }
}
