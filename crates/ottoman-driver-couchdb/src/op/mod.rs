pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod save;
pub(crate) mod view;

use ottoman_core::Error;

/// Maps a non-success response into a store error, draining the body for
/// diagnostics.
pub(crate) async fn status_error(operation: &str, response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Error::store(format!("{operation} returned {status}: {body}"))
}

pub(crate) fn transport_error(operation: &str, err: reqwest::Error) -> Error {
    Error::store(format!("{operation} request failed: {err}"))
}
