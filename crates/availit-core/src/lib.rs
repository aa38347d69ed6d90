pub mod app_config;
pub mod config;
pub mod hospital;
pub mod location;
pub mod sources;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hospital::{
    BedAvailabilityRecord, CanonicalHospitalAvailability, DirectoryRecord, RawHospitalRecord,
};
pub use location::LocationResult;
pub use sources::{
    default_sources, load_sources, ParserConfig, SourceConfig, SourcesFile,
    DEFAULT_ERROR_MESSAGE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[source] serde_yaml::Error),

    #[error("invalid source configuration: {0}")]
    Validation(String),
}
