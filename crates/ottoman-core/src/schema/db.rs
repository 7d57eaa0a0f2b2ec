//! Store-facing schema: the design document wire shape shared with the
//! remote view engine.

mod design;
pub use design::{DesignDocument, ViewFunctions, VIEW_LANGUAGE};
