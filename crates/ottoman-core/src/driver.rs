mod response;
pub use response::{DeleteResponse, Row, SaveResponse, ViewResponse};

use crate::{async_trait, doc::Document, Result};

use indexmap::IndexMap;
use std::fmt::Debug;

/// Remote query parameters, forwarded to the store uninterpreted. Values
/// are JSON; the store decides what `key`, `startkey`, `descending`, and
/// friends mean.
pub type ViewParams = IndexMap<String, serde_json::Value>;

/// The remote store boundary: four blocking round trips, no pooling, no
/// background work. The store owns durability, indexing, and view
/// execution.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Fetch a document by identity. A missing document is a
    /// `document not found` error.
    async fn get_document(&self, id: &str) -> Result<Document>;

    /// Persist a document, new or updated. The store assigns the identity
    /// (when absent) and the revision.
    async fn save_document(&self, doc: &Document) -> Result<SaveResponse>;

    /// Delete the document at the given identity and revision.
    async fn delete_document(&self, id: &str, rev: &str) -> Result<DeleteResponse>;

    /// Query a namespaced view (`<EntityName>/<viewName>`). A missing view
    /// or design document is a `view missing` error.
    async fn query_view(&self, view: &str, params: &ViewParams) -> Result<ViewResponse>;
}
