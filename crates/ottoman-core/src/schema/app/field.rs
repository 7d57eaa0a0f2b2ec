use serde_json::Value;

/// A declared document field. The default, when present, fills the field
/// in on first save if the document carries no value (or null) for it.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        Field {
            name: name.into(),
            default: Some(default),
        }
    }
}
