mod builder;
pub use builder::Builder;

use crate::{
    lifecycle,
    query::{self, QueryOptions, Rows},
    registry::ViewRegistry,
    sync, Model, Result,
};

use ottoman_core::{driver::Driver, schema::app::View};

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) driver: Box<dyn Driver>,
    pub(crate) registry: ViewRegistry,
}

/// A handle to one remote database. Cloning is cheap; all clones share
/// the driver and the view registry, so an entity type's freshness flag
/// is process-wide through a shared handle.
#[derive(Debug, Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Fetches the document stored under `id` and loads it as `T`. A
    /// missing document is an error; see [`find`](Self::find) for the
    /// optional variant.
    pub async fn get<T: Model>(&self, id: &str) -> Result<T> {
        let doc = self.shared.driver.get_document(id).await?;
        T::load(doc)
    }

    /// Like [`get`](Self::get), mapping a missing document to `None`.
    pub async fn find<T: Model>(&self, id: &str) -> Result<Option<T>> {
        match self.shared.driver.get_document(id).await {
            Ok(doc) => Ok(Some(T::load(doc)?)),
            Err(err) if err.is_document_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Persists the record, creating it when it carries no revision and
    /// updating it otherwise. On success the store-assigned identity and
    /// revision (and any default, timestamp, or hook mutations) are
    /// written back into `record`.
    pub async fn save<T: Model>(&self, record: &mut T) -> Result<()> {
        self.shared.registry.ensure(&T::entity());
        lifecycle::save(&self.shared, record).await
    }

    /// Deletes the record from the store and clears its identity and
    /// revision, leaving it saveable as a brand-new record.
    pub async fn destroy<T: Model>(&self, record: &mut T) -> Result<()> {
        lifecycle::destroy(&self.shared, record).await
    }

    /// Declares a view on `T` at runtime. The type's design document is
    /// stale until the next query (or an explicit
    /// [`synchronize`](Self::synchronize)) reconciles it.
    pub fn declare_view<T: Model>(&self, view: View) {
        self.shared.registry.ensure(&T::entity());
        self.shared.registry.declare(T::NAME, &view);
    }

    /// Queries the named view on `T`, synchronizing the design document
    /// first if it is stale.
    pub async fn query<T: Model>(&self, view: &str, options: QueryOptions) -> Result<Rows<T>> {
        self.shared.registry.ensure(&T::entity());
        query::dispatch(&self.shared, view, options).await
    }

    /// Forces a design document synchronization for `T`.
    pub async fn synchronize<T: Model>(&self) -> Result<()> {
        self.shared.registry.ensure(&T::entity());
        sync::synchronize(&self.shared, T::NAME).await
    }
}
