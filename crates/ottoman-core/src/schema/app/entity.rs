use super::{Field, Hook, Hooks, View};
use crate::doc::Document;

use serde_json::Value;

/// Derives the identity to assign when a record is first persisted. An
/// empty result is a configuration error; the record is never saved.
pub type IdRule = fn(&Document) -> String;

/// Declaration of one entity type: its fields and defaults, timestamp
/// tracking, unique-id rule, lifecycle hooks, and named views.
///
/// Built once per type with the fluent methods below and returned from
/// `Model::entity()`. All views declared on an entity live in the single
/// design document derived from its name.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Name of the entity type, recorded in each document's type tag
    pub name: String,

    /// Fields carried by documents of this type
    pub fields: Vec<Field>,

    /// If set, derives the identity assigned on first save
    pub unique_id: Option<IdRule>,

    /// Stamp `created_at` / `updated_at` on create and update
    pub timestamps: bool,

    /// Views declared on this entity type
    pub views: Vec<View>,

    /// Lifecycle callbacks, invoked synchronously by persistence
    pub hooks: Hooks,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            fields: Vec::new(),
            unique_id: None,
            timestamps: false,
            views: Vec::new(),
            hooks: Hooks::default(),
        }
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(Field::new(name));
        self
    }

    pub fn field_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.fields.push(Field::with_default(name, default));
        self
    }

    pub fn timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    pub fn unique_id(mut self, rule: IdRule) -> Self {
        self.unique_id = Some(rule);
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    pub fn before_create(mut self, hook: Hook) -> Self {
        self.hooks.before_create.push(hook);
        self
    }

    pub fn after_create(mut self, hook: Hook) -> Self {
        self.hooks.after_create.push(hook);
        self
    }

    pub fn before_update(mut self, hook: Hook) -> Self {
        self.hooks.before_update.push(hook);
        self
    }

    pub fn after_update(mut self, hook: Hook) -> Self {
        self.hooks.after_update.push(hook);
        self
    }

    pub fn before_destroy(mut self, hook: Hook) -> Self {
        self.hooks.before_destroy.push(hook);
        self
    }

    pub fn after_destroy(mut self, hook: Hook) -> Self {
        self.hooks.after_destroy.push(hook);
        self
    }

    /// Fields declared with a default value.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|field| Some((field.name.as_str(), field.default.as_ref()?)))
    }
}
