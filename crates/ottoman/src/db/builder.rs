use super::{Db, Shared};
use crate::{registry::ViewRegistry, Error, Model, Result};

use ottoman_core::{driver::Driver, schema::app::Entity};

use std::sync::Arc;
use url::Url;

#[derive(Debug, Default)]
pub struct Builder {
    /// Entity declarations registered up front. Types touched through the
    /// `Db` handle are also registered lazily; registering here makes the
    /// declarations visible before any operation runs.
    entities: Vec<Entity>,
}

impl Builder {
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.entities.push(T::entity());
        self
    }

    /// Builds a handle over the given driver.
    pub fn build(&mut self, driver: impl Driver) -> Db {
        let registry = ViewRegistry::default();
        for entity in self.entities.drain(..) {
            registry.ensure(&entity);
        }

        Db {
            shared: Arc::new(Shared {
                driver: Box::new(driver),
                registry,
            }),
        }
    }

    /// Connects to a store by URL. `http` and `https` select the CouchDB
    /// driver.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let parsed = Url::parse(url).map_err(anyhow::Error::from)?;

        match parsed.scheme() {
            "http" | "https" => self.connect_couchdb(url).await,
            scheme => Err(Error::from(anyhow::anyhow!(
                "unsupported store; scheme={scheme}; url={url}"
            ))),
        }
    }

    #[cfg(feature = "couchdb")]
    async fn connect_couchdb(&mut self, url: &str) -> Result<Db> {
        let driver = ottoman_driver_couchdb::CouchDb::connect(url)
            .await
            .map_err(Error::from)?;
        Ok(self.build(driver))
    }

    #[cfg(not(feature = "couchdb"))]
    async fn connect_couchdb(&mut self, _url: &str) -> Result<Db> {
        Err(Error::from(anyhow::anyhow!("`couchdb` feature not enabled")))
    }
}
