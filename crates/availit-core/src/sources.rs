use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::is_http_url;
use crate::ConfigError;

/// Error body message used when a source does not configure its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to fetch hospital data";

pub const DEFAULT_TABLE_CONTAINER: &str = "table.DataGridBody";
pub const DEFAULT_TABLE_ROW: &str = r#"tr[align="center"]"#;
pub const DEFAULT_TABLE_CELL: &str = "td";
pub const DEFAULT_CARD_CONTAINER: &str = "div.gen-card-content";
pub const DEFAULT_CARD_NAME: &str = "h2.heading4, h1, h2, h3, h4, h5, strong, b";

const DELHI_URL: &str = "https://dshm.delhi.gov.in/mis/(S(0phtuhcljd0u01xfvsz3cgrg))/Private/frmFreeBedMonitoringReport.aspx";
const BANGALORE_URL: &str = "https://bengaluruurban.nic.in/en/public-utility-category/hospitals/";

/// How a source page is laid out, and the selectors used to pick it apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParserConfig {
    /// Fixed-column HTML table report.
    Table {
        #[serde(default = "default_table_container")]
        container: String,
        #[serde(default = "default_table_row")]
        row: String,
        #[serde(default = "default_table_cell")]
        cell: String,
    },
    /// Repeated div/card blocks with free-form text.
    Card {
        #[serde(default = "default_card_container")]
        container: String,
        #[serde(default = "default_card_name")]
        name: String,
    },
}

impl ParserConfig {
    #[must_use]
    pub fn table() -> Self {
        ParserConfig::Table {
            container: default_table_container(),
            row: default_table_row(),
            cell: default_table_cell(),
        }
    }

    #[must_use]
    pub fn card() -> Self {
        ParserConfig::Card {
            container: default_card_container(),
            name: default_card_name(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ParserConfig::Table { .. } => "table",
            ParserConfig::Card { .. } => "card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub parser: ParserConfig,
    #[serde(default = "default_error_message")]
    pub error_message: String,
    /// Treat a page that yields zero records as a failure instead of `[]`.
    #[serde(default)]
    pub fail_on_empty: bool,
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: BTreeMap<String, SourceConfig>,
}

fn default_table_container() -> String {
    DEFAULT_TABLE_CONTAINER.to_string()
}

fn default_table_row() -> String {
    DEFAULT_TABLE_ROW.to_string()
}

fn default_table_cell() -> String {
    DEFAULT_TABLE_CELL.to_string()
}

fn default_card_container() -> String {
    DEFAULT_CARD_CONTAINER.to_string()
}

fn default_card_name() -> String {
    DEFAULT_CARD_NAME.to_string()
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

/// The built-in registry: the Delhi bed report and the Bangalore hospital directory.
#[must_use]
pub fn default_sources() -> BTreeMap<String, SourceConfig> {
    let mut sources = BTreeMap::new();
    sources.insert(
        "delhi".to_string(),
        SourceConfig {
            url: DELHI_URL.to_string(),
            parser: ParserConfig::table(),
            error_message: default_error_message(),
            fail_on_empty: false,
        },
    );
    sources.insert(
        "bangalore".to_string(),
        SourceConfig {
            url: BANGALORE_URL.to_string(),
            parser: ParserConfig::card(),
            error_message: "Failed to fetch Bangalore hospital data".to_string(),
            fail_on_empty: false,
        },
    );
    sources
}

/// Load and validate a source registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    for (key, source) in &sources_file.sources {
        if !is_valid_key(key) {
            return Err(ConfigError::Validation(format!(
                "source key '{key}' must be a lowercase slug of [a-z0-9-]"
            )));
        }

        if !is_http_url(&source.url) {
            return Err(ConfigError::Validation(format!(
                "source '{key}' has invalid url '{}'; must start with http:// or https://",
                source.url
            )));
        }

        if source.error_message.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{key}' has an empty error_message"
            )));
        }
    }

    Ok(())
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('-')
        && !key.ends_with('-')
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
