pub mod db;
pub use db::Db;

mod lifecycle;

mod model;
pub use model::Model;

pub mod query;
pub use query::{QueryOptions, Rows};

mod registry;

pub mod schema;

mod sync;

pub use ottoman_core::{doc, driver, Document, Error, Result};
