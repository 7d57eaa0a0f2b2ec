use crate::CouchDb;

use ottoman_core::{
    driver::{ViewParams, ViewResponse},
    Error, Result,
};
use reqwest::StatusCode;

pub(crate) async fn execute(
    driver: &CouchDb,
    view: &str,
    params: &ViewParams,
) -> Result<ViewResponse> {
    let (design, name) = split(view)?;
    let url = driver.url_for(&["_design", design, "_view", name])?;

    // Every view query parameter is a JSON value on the wire, string keys
    // included; the store parses them back.
    let mut query = Vec::with_capacity(params.len());
    for (param, value) in params {
        query.push((param.as_str(), serde_json::to_string(value)?));
    }

    tracing::trace!(%url, ?query, "query view");

    let response = driver
        .client
        .get(url)
        .query(&query)
        .send()
        .await
        .map_err(|err| super::transport_error("view", err))?;

    match response.status() {
        StatusCode::NOT_FOUND => Err(Error::view_missing(view)),
        status if status.is_success() => response
            .json()
            .await
            .map_err(|err| super::transport_error("view", err)),
        _ => Err(super::status_error("view", response).await),
    }
}

fn split(view: &str) -> Result<(&str, &str)> {
    view.split_once('/').ok_or_else(|| {
        Error::from(anyhow::anyhow!(
            "malformed view name `{view}`; expected `Entity/view`"
        ))
    })
}
