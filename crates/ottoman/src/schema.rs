pub use ottoman_core::schema::*;

pub use ottoman_core::schema::app::{Entity, Field, Hook, Hooks, IdRule, View, ViewKind};
