use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to read config file '{path}': {cause}")]
    ConfigRead { path: PathBuf, cause: io::Error },

    #[error("Failed to parse config file '{path}': {cause}")]
    ConfigParse {
        path: PathBuf,
        cause: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read activity log '{path}': {cause}")]
    ActivityLogRead { path: PathBuf, cause: io::Error },

    #[error("Failed to parse activity log '{path}': {cause}")]
    ActivityLogParse {
        path: PathBuf,
        cause: serde_json::Error,
    },

    #[error("Failed to read translation catalog '{path}': {cause}")]
    CatalogRead { path: PathBuf, cause: io::Error },

    #[error("Failed to parse translation catalog '{path}': {cause}")]
    CatalogParse {
        path: PathBuf,
        cause: serde_json::Error,
    },

    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Failed to render template: {0}")]
    Template(#[from] tera::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
