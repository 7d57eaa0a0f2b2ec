use crate::{doc::Document, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scripting language of the remote view engine.
pub const VIEW_LANGUAGE: &str = "javascript";

/// The stored object bundling an entity type's view definitions under a
/// single identity. One design document per entity type; all views
/// declared on the type live here.
///
/// The serialized shape must stay bit-exact with existing deployments:
///
/// ```json
/// { "_id": "_design/Article", "language": "javascript",
///   "views": { "by_date": { "map": "...", "reduce": "..." } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    pub language: String,

    #[serde(default)]
    pub views: IndexMap<String, ViewFunctions>,
}

/// A view's function pair as stored in the design document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFunctions {
    pub map: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

impl DesignDocument {
    /// The deterministic identity of the design document owned by the
    /// named entity type.
    pub fn id_for(entity_name: &str) -> String {
        format!("_design/{entity_name}")
    }

    pub fn new(entity_name: &str) -> Self {
        DesignDocument {
            id: Self::id_for(entity_name),
            rev: None,
            language: VIEW_LANGUAGE.to_string(),
            views: IndexMap::new(),
        }
    }

    /// Overwrites or inserts the given views, preserving entries present
    /// here but not in `views` (e.g. declared by another process).
    pub fn merge(&mut self, views: &IndexMap<String, ViewFunctions>) {
        for (name, functions) in views {
            self.views.insert(name.clone(), functions.clone());
        }
    }

    pub fn from_document(doc: Document) -> Result<Self> {
        Ok(serde_json::from_value(doc.into_value())?)
    }

    pub fn to_document(&self) -> Result<Document> {
        Document::from_value(serde_json::to_value(self)?)
    }
}
