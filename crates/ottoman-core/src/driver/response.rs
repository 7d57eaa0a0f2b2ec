use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store acknowledgement of a save: the assigned identity and revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

/// Store acknowledgement of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub ok: bool,
}

/// Result of a view query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

/// One view result row. Rows from a map-only query carry the identity of
/// the emitting document; reduced rows carry none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub key: Value,

    #[serde(default)]
    pub value: Value,
}

impl Row {
    pub fn new(id: impl Into<String>, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Row {
            id: Some(id.into()),
            key: key.into(),
            value: value.into(),
        }
    }

    /// A row without a document identity, as produced by reduced queries.
    pub fn reduced(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Row {
            id: None,
            key: key.into(),
            value: value.into(),
        }
    }
}
