//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        source: pinch_project::ProjectError,
    },

    #[error("Analysis failed: {0}")]
    Analysis(#[from] pinch_core::PinchError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
