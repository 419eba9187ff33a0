pub mod app_config;
pub mod catalog;
pub mod config;
pub mod marker;
pub mod position;

pub use app_config::{AppConfig, Environment};
pub use catalog::{LocationDefinition, RawPosition, StoreCatalog, StoreDefinition};
pub use config::{load_app_config, load_app_config_from_env};
pub use marker::{
    MarkerDetails, MarkerId, MarkerOrigin, MarkerRecord, CUSTOM_MARKERS_CATEGORY, NO_LINK,
    UNKNOWN_ADDRESS,
};
pub use position::Position;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid position \"{raw}\": {reason}")]
    InvalidPosition { raw: String, reason: String },
}
