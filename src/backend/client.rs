use super::query::SelectQuery;
use super::types::{ErrorEnvelope, SearchOutcome, SelectResponse};
use crate::error::BackendError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// The seam between the HTTP handlers and the search engine.
///
/// One instance is built at start-up and shared by every request, so
/// implementations must be safe for concurrent use.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one `select` and return the page of results.
    async fn search(&self, query: &SelectQuery) -> Result<SearchOutcome, BackendError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), BackendError>;
}

/// `SearchBackend` over Solr's HTTP/JSON API.
///
/// Holds a single pooled `reqwest::Client`; every request is bounded by the
/// timeout given at construction.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    select_url: Url,
    ping_url: Url,
}

impl SolrClient {
    /// `core_url` is the core's base, e.g. `http://localhost:8983/solr/search_core`.
    pub fn new(core_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut base = Url::parse(core_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            select_url: base.join("select")?,
            ping_url: base.join("admin/ping")?,
        })
    }

    pub fn select_url(&self) -> &Url {
        &self.select_url
    }

    pub fn ping_url(&self) -> &Url {
        &self.ping_url
    }

    async fn get_json(
        &self,
        url: &Url,
        params: &[(&'static str, String)],
    ) -> Result<Vec<u8>, BackendError> {
        let response = self.http.get(url.clone()).query(params).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl SearchBackend for SolrClient {
    async fn search(&self, query: &SelectQuery) -> Result<SearchOutcome, BackendError> {
        tracing::debug!("Solr select q={:?} start={} rows={}", query.q, query.start, query.rows);

        let body = self.get_json(&self.select_url, &query.to_params()).await?;
        let response: SelectResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            "Solr returned {} docs (numFound={})",
            response.response.docs.len(),
            response.response.num_found
        );
        Ok(response.into())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        self.get_json(&self.ping_url, &[("wt", "json".to_string())])
            .await
            .map(|_| ())
    }
}

/// Pull `error.msg` out of a Solr error body, falling back to the raw text.
fn error_message(body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        if let Some(msg) = envelope.error.msg {
            return msg;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text.chars().take(200).collect()
    }
}
