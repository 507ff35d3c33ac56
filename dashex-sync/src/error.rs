//! Error types for dashex-sync.

use std::path::PathBuf;

use thiserror::Error;

use dashex_client::ApiError;
use dashex_core::CoreError;

/// All errors that can arise from pull and push runs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the service or the transport.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An error reading, parsing, or rendering a document.
    #[error("document error: {0}")]
    Core(#[from] CoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local dashboard file has no `meta.slug` to reconcile on.
    #[error("dashboard at {path} has no meta.slug")]
    MissingSlug { path: PathBuf },
}

impl SyncError {
    /// The underlying service error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            SyncError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
