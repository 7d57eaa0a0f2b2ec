use crate::{Document, Result};

use ottoman_core::schema::app::Entity;
use serde::{de::DeserializeOwned, Serialize};

/// An entity type mapped onto documents in the store.
///
/// Implementations declare their shape once, as an explicit [`Entity`]
/// schema object; persistence and query dispatch consume that declaration
/// through a single generic path. Identity and revision live on the
/// instance (`_id` / `_rev` in the serialized form) and are written back
/// by [`Db::save`](crate::Db::save).
pub trait Model: Serialize + DeserializeOwned + Send + Sized {
    /// Name of the entity type. Recorded in each document's type tag and
    /// used to key the design document.
    const NAME: &'static str;

    /// The entity declaration: fields, defaults, unique-id rule,
    /// timestamp tracking, views, and lifecycle hooks.
    fn entity() -> Entity;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    fn rev(&self) -> Option<&str>;

    fn set_rev(&mut self, rev: Option<String>);

    /// Load an instance of the model from the given document.
    fn load(doc: Document) -> Result<Self> {
        Ok(serde_json::from_value(doc.into_value())?)
    }

    fn to_document(&self) -> Result<Document> {
        Document::from_value(serde_json::to_value(self)?)
    }
}
