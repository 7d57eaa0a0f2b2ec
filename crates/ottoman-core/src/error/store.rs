/// Any other failure reported by the remote store or its transport.
/// Propagated immediately, without retry.
#[derive(Debug, Clone)]
pub(super) struct StoreError {
    pub(super) detail: String,
}

impl StoreError {
    pub(super) fn new(detail: String) -> Self {
        StoreError { detail }
    }
}

impl std::error::Error for StoreError {}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "store error: {}", self.detail)
    }
}
