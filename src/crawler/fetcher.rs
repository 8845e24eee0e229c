//! HTTP page fetcher
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests returning parsed documents
//! - Retry logic for transient failures
//! - Error classification
//!
//! Retry policy:
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 404 | Fail fast |
//! | HTTP 429 | Retry up to max-retries, retry-delay pause |
//! | HTTP 5xx | Retry up to max-retries, retry-delay pause |
//! | Timeout | Retry up to max-retries, retry-delay pause |
//! | Connection refused | Fail fast |
//! | Non-HTML Content-Type | Fail fast |

use crate::config::{HarvestConfig, UserAgentConfig};
use crate::HarvestError;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use gallery_harvest::config::UserAgentConfig;
/// use gallery_harvest::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "GalleryHarvest".to_string(),
///     crawler_version: "0.2".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages and returns them as parsed documents
///
/// One fetch is in flight at a time; the configured request delay is applied
/// before every request so consecutive fetches do not hammer the source site.
pub struct Fetcher {
    client: Client,
    request_delay: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new(user_agent: &UserAgentConfig, harvest: &HarvestConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            request_delay: Duration::from_millis(harvest.request_delay),
            max_retries: harvest.max_retries,
            retry_delay: Duration::from_millis(harvest.retry_delay),
        })
    }

    /// Fetches a page, retrying transient failures, and parses it
    pub async fn fetch(&self, url: &Url) -> Result<Html, HarvestError> {
        let mut attempt = 0;

        loop {
            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            match self.fetch_once(url).await {
                Ok(body) => return Ok(Html::parse_document(&body)),
                Err(e) if attempt < self.max_retries && is_transient(&e) => {
                    attempt += 1;
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "transient fetch failure, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, HarvestError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| HarvestError::Http {
                url: url.to_string(),
                source: e,
            })?;

        // Sites that matter here always serve text/html; a present but
        // different Content-Type means the locator led somewhere unexpected
        // (a PDF download, an image) and the page cannot be extracted.
        if let Some(content_type) = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(HarvestError::UnexpectedContent {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response.text().await.map_err(|e| classify_request_error(url, e))
    }
}

fn classify_request_error(url: &Url, e: reqwest::Error) -> HarvestError {
    if e.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}

/// Whether a fetch failure is worth retrying
///
/// Timeouts, 429 and 5xx responses tend to clear up on their own; 404s and
/// refused connections do not.
fn is_transient(error: &HarvestError) -> bool {
    match error {
        HarvestError::Timeout { .. } => true,
        HarvestError::Http { source, .. } => source.status().map_or(false, |status| {
            status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestHarvester".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_timeout_is_transient() {
        let error = HarvestError::Timeout {
            url: "http://example.com/".to_string(),
        };
        assert!(is_transient(&error));
    }

    #[test]
    fn test_unexpected_content_is_not_transient() {
        let error = HarvestError::UnexpectedContent {
            url: "http://example.com/".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert!(!is_transient(&error));
    }

    // Status-code classification is covered end-to-end by the wiremock
    // harvest tests, where real reqwest errors are available.
}
