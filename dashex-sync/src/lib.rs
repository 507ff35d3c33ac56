//! # dashex-sync
//!
//! Reconciliation between a Grafana instance and a local `grafana/` tree.
//!
//! Call [`pull`] to write the live configuration to disk, or [`push`] to
//! create or update remote documents from disk.

pub mod error;
pub mod pull;
pub mod push;
pub mod writer;

pub use error::SyncError;
pub use pull::{pull, PullOptions, PullReport};
pub use push::{
    dashboard_ids, datasource_ids, push, DocumentKind, PushOptions, PushOutcome, PushReport,
    PushedDocument,
};
pub use writer::WriteResult;
