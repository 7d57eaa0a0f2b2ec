mod op;

use ottoman_core::{
    doc::Document,
    driver::{DeleteResponse, Driver, SaveResponse, ViewParams, ViewResponse},
    Result,
};

use anyhow::anyhow;
use reqwest::Client;
use url::Url;

/// Driver for a CouchDB database reached over HTTP. One `Client`, no
/// pooling discipline of its own; every operation is a single
/// request/response round trip.
#[derive(Debug)]
pub struct CouchDb {
    client: Client,
    base: Url,
}

impl CouchDb {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let url = Url::parse(url)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "connection URL does not have an `http` or `https` scheme; url={url}"
            ));
        }

        if url.path().trim_matches('/').is_empty() {
            return Err(anyhow!("connection URL does not name a database; url={url}"));
        }

        Ok(Self::new(Client::new(), url))
    }

    /// URL of the document stored under `id`. The identity is pushed as a
    /// single path segment, so embedded slashes (design document ids) are
    /// percent-encoded the way the store expects.
    pub(crate) fn doc_url(&self, id: &str) -> anyhow::Result<Url> {
        self.url_for(&[id])
    }

    pub(crate) fn url_for(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| anyhow!("base URL cannot carry a path; url={}", self.base))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    pub(crate) fn database_url(&self) -> Url {
        self.base.clone()
    }
}

#[ottoman_core::async_trait]
impl Driver for CouchDb {
    async fn get_document(&self, id: &str) -> Result<Document> {
        op::get::execute(self, id).await
    }

    async fn save_document(&self, doc: &Document) -> Result<SaveResponse> {
        op::save::execute(self, doc).await
    }

    async fn delete_document(&self, id: &str, rev: &str) -> Result<DeleteResponse> {
        op::delete::execute(self, id, rev).await
    }

    async fn query_view(&self, view: &str, params: &ViewParams) -> Result<ViewResponse> {
        op::view::execute(self, view, params).await
    }
}
