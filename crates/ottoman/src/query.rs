use crate::db::Shared;
use crate::{sync, Error, Model, Result};

use ottoman_core::driver::{Row, ViewParams};

use serde_json::Value;

/// Options for one view query: the local `raw` and `reduce` instructions
/// plus an open-ended passthrough of remote query parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    raw: Option<bool>,
    reduce: bool,
    params: ViewParams,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the store's result rows unmodified instead of hydrating
    /// entities. A local instruction; it is never sent to the store.
    pub fn raw(mut self) -> Self {
        self.raw = Some(true);
        self
    }

    /// Hydrate entities even on a view that declares a reduce function
    /// (which otherwise defaults to raw mode).
    pub fn hydrate(mut self) -> Self {
        self.raw = Some(false);
        self
    }

    /// Request the view's reduce function. Forces raw mode for this call,
    /// since reduced output is not a sequence of identity-bearing
    /// documents; also forwarded to the store as `reduce=true`.
    pub fn reduce(mut self) -> Self {
        self.reduce = true;
        self.params.insert("reduce".to_string(), Value::Bool(true));
        self
    }

    pub fn key(self, key: impl Into<Value>) -> Self {
        self.param("key", key)
    }

    pub fn start_key(self, key: impl Into<Value>) -> Self {
        self.param("startkey", key)
    }

    pub fn end_key(self, key: impl Into<Value>) -> Self {
        self.param("endkey", key)
    }

    pub fn descending(self) -> Self {
        self.param("descending", true)
    }

    pub fn limit(self, limit: u64) -> Self {
        self.param("limit", limit)
    }

    pub fn skip(self, skip: u64) -> Self {
        self.param("skip", skip)
    }

    /// Forwards an arbitrary store parameter, uninterpreted.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Splits into the effective raw-mode flag and the parameters that
    /// travel to the store. Requesting the reduce forces raw mode;
    /// otherwise a view-declared reduce makes raw the default, which an
    /// explicit [`raw`](Self::raw) / [`hydrate`](Self::hydrate) call
    /// overrides.
    fn into_parts(self, view_has_reduce: bool) -> (bool, ViewParams) {
        let raw = if self.reduce {
            true
        } else {
            self.raw.unwrap_or(view_has_reduce)
        };
        (raw, self.params)
    }
}

/// Result of a view query: hydrated entities, or the raw result rows when
/// raw mode (or a reduce) was requested.
#[derive(Debug)]
pub enum Rows<T> {
    Entities(Vec<T>),
    Raw(Vec<Row>),
}

impl<T> Rows<T> {
    pub fn into_entities(self) -> Result<Vec<T>> {
        match self {
            Rows::Entities(entities) => Ok(entities),
            Rows::Raw(_) => Err(Error::from(anyhow::anyhow!(
                "query ran in raw mode; rows were not hydrated"
            ))),
        }
    }

    pub fn into_raw(self) -> Result<Vec<Row>> {
        match self {
            Rows::Raw(rows) => Ok(rows),
            Rows::Entities(_) => Err(Error::from(anyhow::anyhow!(
                "query hydrated entities; no raw rows"
            ))),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rows::Entities(entities) => entities.len(),
            Rows::Raw(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Issues a view query, keeping the design document fresh and recovering
/// exactly once from a missing view.
///
/// One invocation makes at most two query attempts and one forced
/// synchronization: stale registry, synchronize (outcome ignored),
/// dispatch, and on a missing view a single forced synchronization and
/// retry before the failure becomes permanent. No backoff.
pub(crate) async fn dispatch<T: Model>(
    shared: &Shared,
    view_name: &str,
    options: QueryOptions,
) -> Result<Rows<T>> {
    let entity_name = T::NAME;
    let view_has_reduce = shared
        .registry
        .lookup(entity_name, view_name)
        .is_some_and(|functions| functions.reduce.is_some());
    let (raw, params) = options.into_parts(view_has_reduce);

    if !shared.registry.is_fresh(entity_name) {
        if let Err(err) = sync::synchronize(shared, entity_name).await {
            tracing::warn!(entity = entity_name, %err, "design document synchronization failed");
        }
    }

    let view = format!("{entity_name}/{view_name}");

    let mut forced_resync = false;
    let response = loop {
        match shared.driver.query_view(&view, &params).await {
            Ok(response) => break response,
            Err(err) if err.is_view_missing() && !forced_resync => {
                forced_resync = true;
                tracing::debug!(view = %view, %err, "view missing; forcing design document synchronization");
                if let Err(err) = sync::synchronize(shared, entity_name).await {
                    tracing::warn!(entity = entity_name, %err, "forced synchronization failed");
                }
            }
            Err(err) if err.is_view_missing() => {
                return Err(err.context(Error::query_failed(view.clone())));
            }
            Err(err) => return Err(err),
        }
    };

    if raw {
        return Ok(Rows::Raw(response.rows));
    }

    // Row-embedded fields are never trusted for hydration; every entity
    // is re-fetched by its identity.
    let mut entities = Vec::with_capacity(response.rows.len());
    for row in response.rows {
        let id = row.id.ok_or_else(|| {
            Error::from(anyhow::anyhow!(
                "view row carries no document id; query `{view}` in raw mode"
            ))
        })?;
        let doc = shared.driver.get_document(&id).await?;
        entities.push(T::load(doc)?);
    }

    Ok(Rows::Entities(entities))
}
