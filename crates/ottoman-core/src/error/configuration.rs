/// Error when an entity declaration is unusable, e.g. a unique-id rule
/// returning an empty identity. Raised before anything is persisted.
#[derive(Debug, Clone)]
pub(super) struct ConfigurationError {
    pub(super) message: String,
}

impl ConfigurationError {
    pub(super) fn new(message: String) -> Self {
        ConfigurationError { message }
    }
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}
