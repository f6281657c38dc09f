// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnpassError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Reference database not available: {0}")]
    MissingReference(&'static str),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, UnpassError>;

// Allow `?` on std::io::Error by converting to UnpassError::Io with unknown path.
impl From<std::io::Error> for UnpassError {
    fn from(source: std::io::Error) -> Self {
        UnpassError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl UnpassError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        UnpassError::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn json(source: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        UnpassError::Json {
            source,
            path: path.into(),
        }
    }
}
