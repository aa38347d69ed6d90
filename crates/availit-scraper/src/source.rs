//! One configured live source: fetch a page, parse it, apply the empty-page policy.

use availit_core::{RawHospitalRecord, SourceConfig};

use crate::error::ScraperError;
use crate::fetch::HtmlFetcher;
use crate::parse::{HospitalParser, Parser};

#[derive(Debug, Clone)]
pub struct LiveSource {
    key: String,
    url: String,
    parser: Parser,
    error_message: String,
    fail_on_empty: bool,
}

impl LiveSource {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the configured selectors
    /// do not parse.
    pub fn from_config(key: &str, config: &SourceConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            key: key.to_owned(),
            url: config.url.clone(),
            parser: Parser::from_config(&config.parser)?,
            error_message: config.error_message.clone(),
            fail_on_empty: config.fail_on_empty,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Client-facing message for any failure of this source.
    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Fetches the source page once and extracts its records.
    ///
    /// A page whose layout marker is missing is logged as a probable redesign.
    /// It still yields `Ok(vec![])` unless the source sets `fail_on_empty`.
    ///
    /// # Errors
    ///
    /// - Any [`HtmlFetcher::fetch_html`] error.
    /// - [`ScraperError::EmptyExtraction`] when `fail_on_empty` is set and no
    ///   records were extracted.
    pub async fn scrape(
        &self,
        fetcher: &HtmlFetcher,
    ) -> Result<Vec<RawHospitalRecord>, ScraperError> {
        let html = fetcher.fetch_html(&self.url).await?;
        let outcome = self.parser.parse(&html);

        if !outcome.layout_found {
            tracing::warn!(
                source = %self.key,
                url = %self.url,
                parser = self.parser.kind(),
                "layout marker not found; page structure may have changed"
            );
        }

        if outcome.records.is_empty() && self.fail_on_empty {
            return Err(ScraperError::EmptyExtraction {
                source_key: self.key.clone(),
                url: self.url.clone(),
            });
        }

        tracing::info!(
            source = %self.key,
            records = outcome.records.len(),
            "scraped live source"
        );
        Ok(outcome.records)
    }
}
