use crate::CouchDb;

use ottoman_core::{
    doc::Document,
    driver::SaveResponse,
    Error, Result,
};
use reqwest::StatusCode;

pub(crate) async fn execute(driver: &CouchDb, doc: &Document) -> Result<SaveResponse> {
    // A document carrying an identity goes to its own URL; the store
    // assigns one otherwise.
    let request = match doc.id() {
        Some(id) => driver.client.put(driver.doc_url(id)?),
        None => driver.client.post(driver.database_url()),
    };

    let response = request
        .json(doc)
        .send()
        .await
        .map_err(|err| super::transport_error("save", err))?;

    match response.status() {
        StatusCode::CONFLICT => Err(Error::persistence(
            "save",
            format!("revision conflict; id={}", doc.id().unwrap_or("<none>")),
        )),
        status if status.is_success() => response
            .json()
            .await
            .map_err(|err| super::transport_error("save", err)),
        _ => Err(super::status_error("save", response).await),
    }
}
