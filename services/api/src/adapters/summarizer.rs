//! services/api/src/adapters/summarizer.rs
//!
//! Adapter for the external summarization endpoint. The endpoint takes a
//! percent-encoded absolute URL as its path and returns a text/markdown
//! summary of the page as the response body.

use async_trait::async_trait;
use linkvault_core::ports::{PortError, PortResult, SummaryService};
use url::Url;

pub struct HttpSummarizer {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSummarizer {
    /// Creates the adapter from a shared client and the endpoint base URL
    /// (e.g. `https://r.jina.ai`).
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Builds `<base>/<percent-encoded target>`; the target URL becomes a
    /// single path segment, so its own slashes are escaped.
    fn request_url(&self, target: &str) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("summarizer base URL cannot be a base".into()))?
            .pop_if_empty()
            .push(target);
        Ok(url)
    }
}

#[async_trait]
impl SummaryService for HttpSummarizer {
    async fn summarize(&self, url: &str) -> PortResult<String> {
        let request_url = self.request_url(url)?;

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        // A non-success body is an upstream error page, not a summary.
        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Upstream(format!(
                "summarizer returned {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))
    }
}
