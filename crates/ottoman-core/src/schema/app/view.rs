use crate::doc;
use crate::schema::db::ViewFunctions;

/// A named view declared on an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub kind: ViewKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// User-supplied map function, with an optional reduce function.
    Custom {
        map: String,
        reduce: Option<String>,
    },

    /// Conventional view over the named fields, in order. Lowers to a
    /// generated map function keyed on the field values; no reduce.
    Keys(Vec<String>),
}

impl View {
    /// Declares a conventional view over the given fields. The view is
    /// named `by_<k1>_and_<k2>_...` after the fields, in order.
    pub fn by<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        assert!(!keys.is_empty(), "conventional view requires at least one key");
        View {
            name: format!("by_{}", keys.join("_and_")),
            kind: ViewKind::Keys(keys),
        }
    }

    /// Declares a view with a user-supplied map function.
    pub fn custom(name: impl Into<String>, map: impl Into<String>) -> Self {
        View {
            name: name.into(),
            kind: ViewKind::Custom {
                map: map.into(),
                reduce: None,
            },
        }
    }

    pub fn reduce(mut self, reduce: impl Into<String>) -> Self {
        match &mut self.kind {
            ViewKind::Custom { reduce: slot, .. } => *slot = Some(reduce.into()),
            ViewKind::Keys(_) => panic!("conventional views do not take a reduce function"),
        }
        self
    }

    /// Whether a reduce function is attached. Queries requesting the
    /// reduce return raw rows rather than hydrated entities.
    pub fn has_reduce(&self) -> bool {
        matches!(&self.kind, ViewKind::Custom { reduce: Some(_), .. })
    }

    /// Lowers the declaration to the store-facing function pair,
    /// generating the map source for conventional views.
    pub fn lower(&self, entity_name: &str) -> ViewFunctions {
        match &self.kind {
            ViewKind::Custom { map, reduce } => ViewFunctions {
                map: map.clone(),
                reduce: reduce.clone(),
            },
            ViewKind::Keys(keys) => ViewFunctions {
                map: conventional_map(entity_name, keys),
                reduce: None,
            },
        }
    }
}

/// Generates the map function for a conventional view: filter on the type
/// tag, guard that every keyed field is present, emit the field value (or
/// the ordered tuple of values) with a null value.
fn conventional_map(entity_name: &str, keys: &[String]) -> String {
    let guard = keys
        .iter()
        .map(|key| format!("doc['{key}'] != null"))
        .collect::<Vec<_>>()
        .join(" && ");

    let emitted = if keys.len() == 1 {
        format!("doc['{}']", keys[0])
    } else {
        let parts = keys
            .iter()
            .map(|key| format!("doc['{key}']"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{parts}]")
    };

    format!(
        "function(doc) {{\n  if (doc['{type_tag}'] == '{entity_name}' && {guard}) {{\n    emit({emitted}, null);\n  }}\n}}",
        type_tag = doc::TYPE_TAG,
    )
}
