//! Client for the external `/api/search` endpoint

use crate::models::{ErrorBody, ResponseFormat, SearchResults};
use reqwest::header::ACCEPT;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const FALLBACK_MESSAGE: &str = "Search failed";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Non-2xx answer; the message is shown to the user as is
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Connection, timeout or body read failure; details go to the log only
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
}

/// Anything able to answer a search query
pub trait SearchBackend {
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResults, SearchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: String,
}

fn transport(e: reqwest::Error) -> SearchError {
    warn!("search request failed: {e}");
    SearchError::Transport(e)
}

impl HttpSearchClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/search", self.base_url)
    }

    /// Raw body in the requested encoding (JSON-LD and Turtle are not decoded)
    pub async fn fetch_raw(&self, query: &str, format: ResponseFormat) -> Result<String, SearchError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", query)])
            .header(ACCEPT, format.accept())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            return Err(SearchError::Api { status: status.as_u16(), message });
        }
        Ok(body)
    }
}

impl SearchBackend for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", query)])
            .header(ACCEPT, ResponseFormat::Json.accept())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        debug!(query, status = %status, len = bytes.len(), "search response");

        // the body is decoded before the status is looked at, so a non-JSON
        // error page surfaces as a decode error
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            let message = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(FALLBACK_MESSAGE)
                .to_string();
            return Err(SearchError::Api { status: status.as_u16(), message });
        }

        Ok(serde_json::from_value(value)?)
    }
}
