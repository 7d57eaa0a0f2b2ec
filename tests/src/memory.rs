use ottoman_core::{
    doc::Document,
    driver::{DeleteResponse, Driver, Row, SaveResponse, ViewParams, ViewResponse},
    Error, Result,
};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory stand-in for the remote store.
///
/// Documents live in a map with CouchDB-style revision checking. View
/// queries answer from canned rows, but only once the owning design
/// document exists and names the view, so the lazy-synchronization path
/// is exercised for real. Failures can be scripted per operation, and
/// every round trip is logged for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    documents: HashMap<String, Document>,
    rows: HashMap<String, Vec<Row>>,
    missing_views: HashMap<String, usize>,
    broken_views: HashMap<String, usize>,
    failing_saves: usize,
    rev_counter: u64,
    ops: Vec<DriverOp>,
}

/// One logged round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverOp {
    Get(String),
    Save(String),
    Delete(String),
    View(String, ViewParams),
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document directly into the store, assigning a revision if
    /// the document carries none.
    pub fn insert_document(&self, mut doc: Document) {
        let mut state = self.state.lock().unwrap();
        let id = doc
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        doc.set_id(id.clone());
        if doc.rev().is_none() {
            let rev = state.next_rev(1);
            doc.set_rev(rev);
        }
        state.documents.insert(id, doc);
    }

    /// The document currently stored under `id`.
    pub fn document(&self, id: &str) -> Option<Document> {
        self.state.lock().unwrap().documents.get(id).cloned()
    }

    /// Cans the rows returned by the named view (`Entity/view`).
    pub fn rows(&self, view: &str, rows: Vec<Row>) {
        self.state
            .lock()
            .unwrap()
            .rows
            .insert(view.to_string(), rows);
    }

    /// Makes the next `times` queries of the view fail as missing, even
    /// if its design document exists.
    pub fn fail_view_missing(&self, view: &str, times: usize) {
        self.state
            .lock()
            .unwrap()
            .missing_views
            .insert(view.to_string(), times);
    }

    /// Makes the next `times` queries of the view fail with a generic
    /// store error.
    pub fn fail_view_broken(&self, view: &str, times: usize) {
        self.state
            .lock()
            .unwrap()
            .broken_views
            .insert(view.to_string(), times);
    }

    /// Makes the next `times` saves fail with a store error.
    pub fn fail_saves(&self, times: usize) {
        self.state.lock().unwrap().failing_saves = times;
    }

    pub fn ops(&self) -> Vec<DriverOp> {
        self.state.lock().unwrap().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.state.lock().unwrap().ops.clear();
    }

    /// Number of logged queries of the named view.
    pub fn view_attempts(&self, view: &str) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, DriverOp::View(name, _) if name == view))
            .count()
    }

    /// Number of logged saves of the given document id.
    pub fn saves_of(&self, id: &str) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, DriverOp::Save(saved) if saved == id))
            .count()
    }
}

impl State {
    fn next_rev(&mut self, generation: u64) -> String {
        self.rev_counter += 1;
        format!("{generation}-{:08x}", self.rev_counter)
    }

    fn take_failure(map: &mut HashMap<String, usize>, view: &str) -> bool {
        match map.get_mut(view) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[ottoman_core::async_trait]
impl Driver for MemoryDriver {
    async fn get_document(&self, id: &str) -> Result<Document> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(DriverOp::Get(id.to_string()));
        state
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::document_not_found(id))
    }

    async fn save_document(&self, doc: &Document) -> Result<SaveResponse> {
        let mut state = self.state.lock().unwrap();

        if state.failing_saves > 0 {
            state.failing_saves -= 1;
            return Err(Error::store("save unavailable"));
        }

        let id = doc
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let generation = match state.documents.get(&id) {
            Some(stored) => {
                if stored.rev() != doc.rev() {
                    return Err(Error::persistence(
                        "save",
                        format!("revision conflict; id={id}"),
                    ));
                }
                stored
                    .rev()
                    .and_then(|rev| rev.split('-').next())
                    .and_then(|generation| generation.parse::<u64>().ok())
                    .unwrap_or(0)
                    + 1
            }
            None => 1,
        };

        let rev = state.next_rev(generation);
        let mut stored = doc.clone();
        stored.set_id(id.clone());
        stored.set_rev(rev.clone());
        state.documents.insert(id.clone(), stored);
        state.ops.push(DriverOp::Save(id.clone()));

        Ok(SaveResponse { ok: true, id, rev })
    }

    async fn delete_document(&self, id: &str, rev: &str) -> Result<DeleteResponse> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(DriverOp::Delete(id.to_string()));

        match state.documents.get(id) {
            None => Err(Error::document_not_found(id)),
            Some(stored) if stored.rev() != Some(rev) => Err(Error::persistence(
                "delete",
                format!("revision conflict; id={id}"),
            )),
            Some(_) => {
                state.documents.remove(id);
                Ok(DeleteResponse { ok: true })
            }
        }
    }

    async fn query_view(&self, view: &str, params: &ViewParams) -> Result<ViewResponse> {
        let mut state = self.state.lock().unwrap();
        state
            .ops
            .push(DriverOp::View(view.to_string(), params.clone()));

        if State::take_failure(&mut state.missing_views, view) {
            return Err(Error::view_missing(view));
        }
        if State::take_failure(&mut state.broken_views, view) {
            return Err(Error::store(format!("view engine crashed; view={view}")));
        }

        // The view only answers once its design document exists and
        // names it, like the real store.
        let (entity, name) = view.split_once('/').unwrap_or((view, ""));
        let declared = state
            .documents
            .get(&format!("_design/{entity}"))
            .and_then(|ddoc| ddoc.get("views"))
            .and_then(|views| views.as_object())
            .is_some_and(|views| views.contains_key(name));
        if !declared {
            return Err(Error::view_missing(view));
        }

        let rows = state.rows.get(view).cloned().unwrap_or_default();
        Ok(ViewResponse {
            total_rows: Some(rows.len() as u64),
            offset: Some(0),
            rows,
        })
    }
}
