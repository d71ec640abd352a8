//! Field-level partial updates.
//!
//! A [`Patch`] is the document-store style payload sent for an existing
//! record: it names fields and how each one changes. Fields absent from the
//! patch are left untouched.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Overwrite the field.
    Set(Value),
    /// Add to a numeric field (missing counts as zero).
    Increment(i64),
    /// Append values not already present in an array field.
    AddToSet(Vec<Value>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: BTreeMap<String, FieldUpdate>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `Set` patch from every non-null field of `record`, skipping `excluded`.
    pub fn from_record<T: Serialize>(record: &T, excluded: &[&str]) -> Result<Self> {
        let Value::Object(map) = serde_json::to_value(record)? else {
            return Err(ModelError::NotAnObject);
        };
        let fields = map
            .into_iter()
            .filter(|(name, value)| !value.is_null() && !excluded.contains(&name.as_str()))
            .map(|(name, value)| (name, FieldUpdate::Set(value)))
            .collect();
        Ok(Self { fields })
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) -> &mut Self {
        self.fields.insert(field.into(), FieldUpdate::Set(value));
        self
    }

    pub fn increment(&mut self, field: impl Into<String>, by: i64) -> &mut Self {
        self.fields.insert(field.into(), FieldUpdate::Increment(by));
        self
    }

    pub fn add_to_set(&mut self, field: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.fields.insert(field.into(), FieldUpdate::AddToSet(values));
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldUpdate> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldUpdate> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldUpdate)> {
        self.fields.iter().map(|(name, update)| (name.as_str(), update))
    }

    /// Returns a copy of `record` with this patch applied.
    pub fn apply_to<T: Serialize + DeserializeOwned>(&self, record: &T) -> Result<T> {
        let Value::Object(mut map) = serde_json::to_value(record)? else {
            return Err(ModelError::NotAnObject);
        };
        for (field, update) in &self.fields {
            apply_field(&mut map, field, update)?;
        }
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

fn apply_field(map: &mut Map<String, Value>, field: &str, update: &FieldUpdate) -> Result<()> {
    match update {
        FieldUpdate::Set(value) => {
            map.insert(field.to_string(), value.clone());
        }
        FieldUpdate::Increment(by) => {
            let current = match map.get(field) {
                None | Some(Value::Null) => 0,
                Some(value) => value.as_i64().ok_or_else(|| ModelError::NotNumeric {
                    field: field.to_string(),
                })?,
            };
            map.insert(field.to_string(), Value::from(current.saturating_add(*by)));
        }
        FieldUpdate::AddToSet(values) => {
            let entry = map
                .entry(field.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if entry.is_null() {
                *entry = Value::Array(Vec::new());
            }
            let Value::Array(items) = entry else {
                return Err(ModelError::NotAnArray {
                    field: field.to_string(),
                });
            };
            for value in values {
                if !items.contains(value) {
                    items.push(value.clone());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        count: u32,
        tags: Vec<String>,
    }

    fn doc() -> Doc {
        Doc {
            key: "k".to_string(),
            label: Some("old".to_string()),
            count: 2,
            tags: vec!["a".to_string()],
        }
    }

    #[test]
    fn from_record_skips_nulls_and_keys() {
        let incoming = Doc {
            key: "k".to_string(),
            label: None,
            count: 5,
            tags: vec![],
        };
        let patch = Patch::from_record(&incoming, &["key"]).unwrap();
        assert!(patch.get("key").is_none());
        assert!(patch.get("label").is_none());
        assert_eq!(patch.get("count"), Some(&FieldUpdate::Set(json!(5))));
    }

    #[test]
    fn set_leaves_other_fields_untouched() {
        let mut patch = Patch::new();
        patch.set("count", json!(9));
        let updated = patch.apply_to(&doc()).unwrap();
        assert_eq!(updated.count, 9);
        assert_eq!(updated.label.as_deref(), Some("old"));
    }

    #[test]
    fn increment_and_add_to_set() {
        let mut patch = Patch::new();
        patch
            .increment("count", 3)
            .add_to_set("tags", vec![json!("a"), json!("b")]);
        let updated = patch.apply_to(&doc()).unwrap();
        assert_eq!(updated.count, 5);
        assert_eq!(updated.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn increment_rejects_text_field() {
        let mut patch = Patch::new();
        patch.increment("key", 1);
        assert!(matches!(
            patch.apply_to(&doc()),
            Err(ModelError::NotNumeric { .. })
        ));
    }
}
