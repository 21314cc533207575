//! services/api/src/adapters/metadata.rs
//!
//! Adapter that fetches a page and pulls its `<title>` out of the raw HTML.
//! A regex over the body is deliberate; this is best-effort scraping, not
//! HTML parsing, and any page without a match just falls back to its URL.

use async_trait::async_trait;
use linkvault_core::ports::{PageMetadataService, PortError, PortResult};
use regex::Regex;

pub struct HttpPageMetadata {
    client: reqwest::Client,
    title_re: Regex,
}

impl HttpPageMetadata {
    pub fn new(client: reqwest::Client) -> Self {
        // The pattern is static, so compilation cannot fail.
        let title_re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
        Self { client, title_re }
    }

    fn extract_title(&self, html: &str) -> Option<String> {
        self.title_re
            .captures(html)
            .map(|caps| caps[1].trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

#[async_trait]
impl PageMetadataService for HttpPageMetadata {
    async fn fetch_title(&self, url: &str) -> PortResult<Option<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Upstream(format!("page fetch returned {}", status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        Ok(self.extract_title(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> HttpPageMetadata {
        HttpPageMetadata::new(reqwest::Client::new())
    }

    #[test]
    fn extracts_the_first_title_tag() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(
            adapter().extract_title(html),
            Some("Example Domain".to_string())
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_spans_lines() {
        let html = "<HTML><TITLE>\n  Hello\n  World\n</TITLE></HTML>";
        assert_eq!(
            adapter().extract_title(html),
            Some("Hello\n  World".to_string())
        );
    }

    #[test]
    fn title_attributes_are_tolerated() {
        let html = r#"<title data-rh="true">Attributed</title>"#;
        assert_eq!(adapter().extract_title(html), Some("Attributed".to_string()));
    }

    #[test]
    fn missing_or_empty_titles_yield_none() {
        assert_eq!(adapter().extract_title("<html><body>no title</body></html>"), None);
        assert_eq!(adapter().extract_title("<title>   </title>"), None);
    }
}
