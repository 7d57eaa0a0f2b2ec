use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a document within the store.
pub const ID: &str = "_id";

/// Version token assigned by the store on every successful write.
pub const REV: &str = "_rev";

/// Records the owning entity type's name. Generated map functions use this
/// field as a filter guard.
pub const TYPE_TAG: &str = "type";

/// A document as stored in the remote database: a JSON object carrying an
/// identity, a revision token once persisted, and a type tag.
///
/// A freshly constructed document has neither identity nor revision. The
/// store assigns both on first save and reassigns the revision on every
/// update. Destroying a record clears both, making the value eligible for
/// reuse as a brand-new record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a JSON value into a document. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::from(anyhow::anyhow!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID).and_then(Value::as_str)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields.insert(ID.to_string(), Value::String(id.into()));
    }

    pub fn clear_id(&mut self) {
        self.fields.remove(ID);
    }

    pub fn rev(&self) -> Option<&str> {
        self.fields.get(REV).and_then(Value::as_str)
    }

    pub fn set_rev(&mut self, rev: impl Into<String>) {
        self.fields
            .insert(REV.to_string(), Value::String(rev.into()));
    }

    pub fn clear_rev(&mut self) {
        self.fields.remove(REV);
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.fields.get(TYPE_TAG).and_then(Value::as_str)
    }

    pub fn set_type_tag(&mut self, name: impl Into<String>) {
        self.fields
            .insert(TYPE_TAG.to_string(), Value::String(name.into()));
    }

    /// A document is new until the store has assigned it a revision.
    pub fn is_new(&self) -> bool {
        self.rev().is_none()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether the field is present with a non-null value. Field defaults
    /// apply only where this returns false.
    pub fn is_set(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|value| !value.is_null())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
