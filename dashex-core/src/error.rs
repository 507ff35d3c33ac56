//! Error types for dashex-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading, rendering, or locating documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, with the path that was being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document on disk could not be parsed.
    #[error("failed to parse JSON document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be rendered to normalized JSON.
    #[error("JSON rendering error: {0}")]
    Render(#[source] serde_json::Error),

    /// A data source name or dashboard slug that cannot be used as a file
    /// name inside the tree.
    #[error("{key:?} is not usable as a document file name")]
    InvalidKey { key: String },

    /// The YAML configuration file could not be parsed.
    #[error("failed to parse config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
