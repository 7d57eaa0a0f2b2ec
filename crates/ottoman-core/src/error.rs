mod configuration;
mod document_not_found;
mod persistence;
mod query_failed;
mod store;
mod view_missing;

use configuration::ConfigurationError;
use document_not_found::DocumentNotFoundError;
use persistence::PersistenceError;
use query_failed::QueryFailedError;
use store::StoreError;
use view_missing::ViewMissingError;

use std::sync::Arc;

/// An error that can occur in Ottoman.
///
/// Errors carry a kind and an optional cause chain. The kind of the top of
/// the chain decides how callers react; `is_*` predicates expose the
/// distinctions the dispatcher keys its retry policy on.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Configuration(ConfigurationError),
    DocumentNotFound(DocumentNotFoundError),
    Persistence(PersistenceError),
    QueryFailed(QueryFailedError),
    Serialization(serde_json::Error),
    Store(StoreError),
    ViewMissing(ViewMissingError),
}

impl Error {
    /// The unique-id rule (or other declared schema) produced an unusable
    /// result. Fatal; nothing is persisted.
    pub fn configuration(message: impl Into<String>) -> Self {
        ErrorKind::Configuration(ConfigurationError::new(message.into())).into()
    }

    /// A document fetch found nothing under the given identity.
    pub fn document_not_found(id: impl Into<String>) -> Self {
        ErrorKind::DocumentNotFound(DocumentNotFoundError::new(id.into())).into()
    }

    /// The store reported a save or delete as not-ok.
    pub fn persistence(operation: &'static str, detail: impl Into<String>) -> Self {
        ErrorKind::Persistence(PersistenceError::new(operation, detail.into())).into()
    }

    /// A view query failed permanently, after the forced resynchronization
    /// was already spent.
    pub fn query_failed(view: impl Into<String>) -> Self {
        ErrorKind::QueryFailed(QueryFailedError::new(view.into())).into()
    }

    /// Any other failure reported by the store or its transport.
    pub fn store(detail: impl Into<String>) -> Self {
        ErrorKind::Store(StoreError::new(detail.into())).into()
    }

    /// The store reported the queried view, or its whole design document,
    /// as absent.
    pub fn view_missing(view: impl Into<String>) -> Self {
        ErrorKind::ViewMissing(ViewMissingError::new(view.into())).into()
    }

    /// Adds context to this error. The consequent becomes the new top of
    /// the chain, with `self` as its cause.
    pub fn context(self, consequent: Error) -> Error {
        let inner = match Arc::try_unwrap(consequent.inner) {
            Ok(inner) => {
                assert!(inner.cause.is_none(), "consequent must not have a cause");
                Arc::new(ErrorInner {
                    kind: inner.kind,
                    cause: Some(self),
                })
            }
            Err(shared) => ErrorInner::clone_with_cause(&shared, self),
        };
        Error { inner }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Configuration(_))
    }

    pub fn is_document_not_found(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::DocumentNotFound(_))
    }

    pub fn is_view_missing(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::ViewMissing(_))
    }

    pub fn is_query_failed(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::QueryFailed(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Persistence(_))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = Some(self);
        core::iter::from_fn(move || {
            let current = err?;
            err = current.inner.cause.as_ref();
            Some(current)
        })
    }
}

impl ErrorInner {
    fn clone_with_cause(inner: &Arc<Self>, cause: Error) -> Arc<Self> {
        Arc::new(ErrorInner {
            kind: match &inner.kind {
                ErrorKind::Anyhow(err) => ErrorKind::Anyhow(anyhow::anyhow!("{err}")),
                ErrorKind::Configuration(err) => ErrorKind::Configuration(err.clone()),
                ErrorKind::DocumentNotFound(err) => ErrorKind::DocumentNotFound(err.clone()),
                ErrorKind::Persistence(err) => ErrorKind::Persistence(err.clone()),
                ErrorKind::QueryFailed(err) => ErrorKind::QueryFailed(err.clone()),
                ErrorKind::Serialization(err) => {
                    ErrorKind::Anyhow(anyhow::anyhow!("JSON error: {err}"))
                }
                ErrorKind::Store(err) => ErrorKind::Store(err.clone()),
                ErrorKind::ViewMissing(err) => ErrorKind::ViewMissing(err.clone()),
            },
            cause: Some(cause),
        })
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner.kind {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(&err.inner.kind, f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Configuration(err) => core::fmt::Display::fmt(err, f),
            DocumentNotFound(err) => core::fmt::Display::fmt(err, f),
            Persistence(err) => core::fmt::Display::fmt(err, f),
            QueryFailed(err) => core::fmt::Display::fmt(err, f),
            Serialization(err) => write!(f, "JSON error: {err}"),
            Store(err) => core::fmt::Display::fmt(err, f),
            ViewMissing(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(ErrorKind::Serialization(err))
    }
}
