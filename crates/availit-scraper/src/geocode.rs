//! City-name lookup against a Nominatim-style search endpoint.

use availit_core::LocationResult;
use reqwest::Client;

use crate::error::ScraperError;

/// Forwards a city query to the geocoder and relays its matches.
///
/// Only the first match is requested. An empty result means "location
/// unknown" and is not an error.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    endpoint: String,
}

impl Geocoder {
    /// `client` should already carry the identifying user-agent and timeout
    /// (see [`crate::HtmlFetcher::client`]).
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Looks up `city`, returning the upstream array unchanged (typically zero
    /// or one entries). Entries are not validated; a match with a numeric or
    /// null `lat` is relayed as sent.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for a non-2xx response.
    /// - [`ScraperError::Http`] for transport or timeout failures.
    /// - [`ScraperError::Deserialize`] if the body is not a JSON array.
    pub async fn geocode(&self, city: &str) -> Result<Vec<LocationResult>, ScraperError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("city", city), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let matches = serde_json::from_str::<Vec<LocationResult>>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("geocoder response for city \"{city}\""),
                source: e,
            }
        })?;

        tracing::debug!(city, matches = matches.len(), "geocoded city");
        Ok(matches)
    }
}
