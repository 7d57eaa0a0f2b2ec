use crate::CouchDb;

use ottoman_core::{driver::DeleteResponse, Error, Result};
use reqwest::StatusCode;

pub(crate) async fn execute(driver: &CouchDb, id: &str, rev: &str) -> Result<DeleteResponse> {
    let response = driver
        .client
        .delete(driver.doc_url(id)?)
        .query(&[("rev", rev)])
        .send()
        .await
        .map_err(|err| super::transport_error("delete", err))?;

    match response.status() {
        StatusCode::NOT_FOUND => Err(Error::document_not_found(id)),
        StatusCode::CONFLICT => Err(Error::persistence(
            "delete",
            format!("revision conflict; id={id}"),
        )),
        status if status.is_success() => response
            .json()
            .await
            .map_err(|err| super::transport_error("delete", err)),
        _ => Err(super::status_error("delete", response).await),
    }
}
