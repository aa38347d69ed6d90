//! Outbound HTML fetching for live sources.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Issues one identified GET per call and hands back the page body.
///
/// The timeout covers the whole exchange (connect, headers, body). There is
/// no retry: a failed attempt is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: Client,
}

impl HtmlFetcher {
    /// Creates a fetcher whose client sends `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10).min(Duration::from_secs(timeout_secs)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// The shared client, for other outbound calls that should carry the same
    /// user-agent and timeout (the geocoder).
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] for DNS, connection, TLS, or timeout failures.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched source page");
        Ok(body)
    }
}
