/// Error when the store reports a save or delete as not-ok, including
/// revision conflicts.
#[derive(Debug, Clone)]
pub(super) struct PersistenceError {
    pub(super) operation: &'static str,
    pub(super) detail: String,
}

impl PersistenceError {
    pub(super) fn new(operation: &'static str, detail: String) -> Self {
        PersistenceError { operation, detail }
    }
}

impl std::error::Error for PersistenceError {}

impl core::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.detail)
    }
}
