//! Application-level schema: the statically declared shape of an entity
//! type, consumed by the generic persistence and query dispatch paths.

mod entity;
pub use entity::{Entity, IdRule};

mod field;
pub use field::Field;

mod hook;
pub use hook::{Hook, Hooks};

mod view;
pub use view::{View, ViewKind};
