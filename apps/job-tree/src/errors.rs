use std::path::PathBuf;

use thiserror::Error;

/// Run-level error type. Every variant aborts the run.
///
/// Per-role failures (classification or malformed URIs) are not represented
/// here: they are recovered where they happen and only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read input file '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Input {
            path: path.into(),
            source,
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Output {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::Json {
            path: path.into(),
            source,
        }
    }
}
