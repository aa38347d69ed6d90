//! Command handlers for the CLI.
//!
//! Each handler builds the same outbound client the server uses, so a
//! `scrape` here behaves exactly like one request to `/api/{key}-hospitals`.

use std::collections::BTreeMap;

use availit_core::{AppConfig, LocationResult, SourceConfig};
use availit_scraper::{normalize_record, Geocoder, HtmlFetcher, LiveSource};

pub(crate) fn run_sources(config: &AppConfig) {
    for line in source_lines(&config.sources) {
        println!("{line}");
    }
}

/// Runs one live source and prints the records as pretty JSON.
///
/// # Errors
///
/// Returns an error if `key` is not configured or the scrape fails.
pub(crate) async fn run_scrape(config: &AppConfig, key: &str, canonical: bool) -> anyhow::Result<()> {
    let source_config = config.sources.get(key).ok_or_else(|| {
        let known = config.sources.keys().cloned().collect::<Vec<_>>().join(", ");
        anyhow::anyhow!("unknown source '{key}' (configured: {known})")
    })?;
    let source = LiveSource::from_config(key, source_config)?;
    let fetcher = fetcher(config)?;

    let records = source.scrape(&fetcher).await?;
    let json = if canonical {
        let canonical: Vec<_> = records.iter().map(normalize_record).collect();
        serde_json::to_string_pretty(&canonical)?
    } else {
        serde_json::to_string_pretty(&records)?
    };
    println!("{json}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the geocoder request fails.
pub(crate) async fn run_locate(config: &AppConfig, city: &str) -> anyhow::Result<()> {
    let fetcher = fetcher(config)?;
    let geocoder = Geocoder::new(fetcher.client().clone(), config.geocoder_url.clone());
    let matches = geocoder.geocode(city).await?;
    println!("{}", describe_location(&matches));
    Ok(())
}

fn fetcher(config: &AppConfig) -> anyhow::Result<HtmlFetcher> {
    Ok(HtmlFetcher::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?)
}

pub(crate) fn source_lines(sources: &BTreeMap<String, SourceConfig>) -> Vec<String> {
    sources
        .iter()
        .map(|(key, source)| format!("{key}\t{}\t{}", source.parser.kind(), source.url))
        .collect()
}

/// `lat,lon` of the first match, or `location unknown`.
pub(crate) fn describe_location(matches: &[LocationResult]) -> String {
    match matches.first().and_then(LocationResult::coordinates) {
        Some((lat, lon)) => format!("{lat},{lon}"),
        None => "location unknown".to_string(),
    }
}
