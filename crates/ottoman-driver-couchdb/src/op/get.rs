use crate::CouchDb;

use ottoman_core::{doc::Document, Error, Result};
use reqwest::StatusCode;

pub(crate) async fn execute(driver: &CouchDb, id: &str) -> Result<Document> {
    let url = driver.doc_url(id)?;
    tracing::trace!(%url, "get document");

    let response = driver
        .client
        .get(url)
        .send()
        .await
        .map_err(|err| super::transport_error("get", err))?;

    match response.status() {
        StatusCode::NOT_FOUND => Err(Error::document_not_found(id)),
        status if status.is_success() => {
            let value = response
                .json()
                .await
                .map_err(|err| super::transport_error("get", err))?;
            Document::from_value(value)
        }
        _ => Err(super::status_error("get", response).await),
    }
}
