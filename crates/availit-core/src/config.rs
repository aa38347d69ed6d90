use crate::app_config::{AppConfig, Environment};
use crate::sources::{default_sources, load_sources};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the sources file cannot be loaded.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the sources file cannot be loaded.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("AVAILIT_ENV", "development"));

    let host = or_default("AVAILIT_BIND_HOST", "0.0.0.0")
        .parse::<IpAddr>()
        .map_err(|e| invalid("AVAILIT_BIND_HOST", e.to_string()))?;
    let port = or_default("PORT", "4001")
        .parse::<u16>()
        .map_err(|e| invalid("PORT", e.to_string()))?;
    let bind_addr = SocketAddr::new(host, port);

    let log_level = or_default("AVAILIT_LOG_LEVEL", "info");

    let allowed_origin = or_default("AVAILIT_ALLOWED_ORIGIN", "http://localhost:3000")
        .trim_end_matches('/')
        .to_string();
    if !is_http_url(&allowed_origin) {
        return Err(invalid(
            "AVAILIT_ALLOWED_ORIGIN",
            format!("\"{allowed_origin}\" is not an http(s) origin"),
        ));
    }

    let sources = match lookup("AVAILIT_SOURCES_PATH") {
        Ok(path) if !path.trim().is_empty() => load_sources(&PathBuf::from(path))?.sources,
        _ => default_sources(),
    };

    let scraper_request_timeout_secs = parse_u64("AVAILIT_SCRAPER_REQUEST_TIMEOUT_SECS", "15")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "AVAILIT_SCRAPER_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than 0".to_string(),
        ));
    }
    let scraper_user_agent = or_default("AVAILIT_SCRAPER_USER_AGENT", "AvailItScraper/1.0");

    let geocoder_url = or_default(
        "AVAILIT_GEOCODER_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    if !is_http_url(&geocoder_url) {
        return Err(invalid(
            "AVAILIT_GEOCODER_URL",
            format!("\"{geocoder_url}\" is not an http(s) URL"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        allowed_origin,
        sources,
        scraper_request_timeout_secs,
        scraper_user_agent,
        geocoder_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
