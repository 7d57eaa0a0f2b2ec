use ottoman_core::schema::{
    app::{Entity, View},
    db::{DesignDocument, ViewFunctions},
};

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-entity-type table of lowered view definitions plus a freshness
/// flag. Owned by the `Db` handle; all clones share one registry, since
/// the remote design document is itself a single shared resource.
///
/// Freshness starts false, is set true only immediately after a
/// successful synchronization, and is cleared by every declaration. The
/// check-then-synchronize sequence in the dispatcher is not locked
/// against concurrent callers; two tasks may both synchronize, which the
/// merge step makes harmless.
#[derive(Debug, Default)]
pub(crate) struct ViewRegistry {
    entries: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug, Default)]
struct Entry {
    views: IndexMap<String, ViewFunctions>,
    fresh: bool,
}

impl ViewRegistry {
    /// Seeds an entry from an entity declaration. Idempotent; an existing
    /// entry (including runtime declarations) is left untouched.
    pub(crate) fn ensure(&self, entity: &Entity) {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&entity.name) {
            return;
        }

        let mut entry = Entry::default();
        for view in &entity.views {
            entry
                .views
                .insert(view.name.clone(), view.lower(&entity.name));
        }
        entries.insert(entity.name.clone(), entry);
    }

    /// Adds or overwrites a view and clears the freshness flag,
    /// regardless of its prior value.
    pub(crate) fn declare(&self, entity_name: &str, view: &View) {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(entity_name.to_string()).or_default();
        entry
            .views
            .insert(view.name.clone(), view.lower(entity_name));
        entry.fresh = false;
    }

    pub(crate) fn lookup(&self, entity_name: &str, view_name: &str) -> Option<ViewFunctions> {
        let entries = self.entries.lock().unwrap();
        entries.get(entity_name)?.views.get(view_name).cloned()
    }

    pub(crate) fn is_fresh(&self, entity_name: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.get(entity_name).is_some_and(|entry| entry.fresh)
    }

    pub(crate) fn mark_fresh(&self, entity_name: &str) {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(entity_name) {
            entry.fresh = true;
        }
    }

    /// Builds the entity's design document from the lowered declarations.
    pub(crate) fn design_document(&self, entity_name: &str) -> DesignDocument {
        let entries = self.entries.lock().unwrap();
        let mut ddoc = DesignDocument::new(entity_name);
        if let Some(entry) = entries.get(entity_name) {
            ddoc.views = entry.views.clone();
        }
        ddoc
    }
}
