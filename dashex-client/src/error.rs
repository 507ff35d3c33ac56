//! Error types for dashex-client.

use thiserror::Error;

/// Status the service answers with when a dashboard save would not advance
/// the stored version.
pub const VERSION_CONFLICT: u16 = 412;

/// All errors that can arise from talking to the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Nothing is listening yet (connection refused, DNS failure).
    #[error("cannot connect to {url}: {message}")]
    Unreachable { url: String, message: String },

    /// The service answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    /// Any other transport-level failure (timeout, broken connection, ...).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The readiness probe never succeeded within the allotted time.
    #[error("Grafana is unresponsive at {url} (gave up after {attempts} attempt(s))")]
    Unresponsive { url: String, attempts: u32 },
}

impl ApiError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for the dashboard-save version mismatch (HTTP 412).
    pub fn is_version_conflict(&self) -> bool {
        self.status() == Some(VERSION_CONFLICT)
    }

    /// `true` when the service is not accepting connections yet.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable { .. })
    }
}
