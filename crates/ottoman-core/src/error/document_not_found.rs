/// Error when a document lookup by identity returns no result.
#[derive(Debug, Clone)]
pub(super) struct DocumentNotFoundError {
    pub(super) id: String,
}

impl DocumentNotFoundError {
    pub(super) fn new(id: String) -> Self {
        DocumentNotFoundError { id }
    }
}

impl std::error::Error for DocumentNotFoundError {}

impl core::fmt::Display for DocumentNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "document not found: {}", self.id)
    }
}
