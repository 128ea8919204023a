use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::config::ScrapeConfig;
use crate::error::{ImporterError, Result};
use crate::traits::PageFetcher;

/// Fetches listing pages with browser-like headers.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::info!("Fetching listing page: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ImporterError::ExtractionError(format!(
                "HTTP error {}: {}",
                response.status(),
                url
            )));
        }

        let html = response.text().await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());
        Ok(html)
    }
}
