//! Shared configuration for the creator search pipeline.
//!
//! [`AppConfig`] carries process-level settings read from the environment;
//! [`TargetsConfig`] carries the campaign definition (tiers, categories,
//! quotas, bounds) read from YAML.

pub mod app_config;
pub mod config;
pub mod targets;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use targets::{
    default_targets, load_targets, parse_targets, slugify, CategoryConfig, Quota, TargetsConfig,
    TierBand,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[from] serde_yaml::Error),

    #[error("invalid targets: {0}")]
    Validation(String),
}
