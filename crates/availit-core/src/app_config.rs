use std::collections::BTreeMap;
use std::net::SocketAddr;

use crate::sources::SourceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Startup configuration for the scraper service and CLI.
///
/// Built once by [`crate::load_app_config`] and handed to the endpoint layer;
/// nothing reads the environment after this value exists.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// The single browser origin allowed to call the API (with credentials).
    pub allowed_origin: String,
    /// Live sources keyed by city slug, e.g. `delhi` → `/api/delhi-hospitals`.
    pub sources: BTreeMap<String, SourceConfig>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub geocoder_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("allowed_origin", &self.allowed_origin)
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("geocoder_url", &self.geocoder_url)
            .finish()
    }
}
