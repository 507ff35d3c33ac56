//! dashex core library: document types, on-disk layout, config, errors.
//!
//! - [`types`]: data source, dashboard and search result documents
//! - [`layout`]: `<root>/grafana/...` paths and directory helpers
//! - [`document`]: normalized JSON rendering / loading
//! - [`config`]: optional YAML config file
//! - [`error`]: [`CoreError`]

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod types;

pub use config::FileConfig;
pub use error::CoreError;
pub use types::{
    Dashboard, DashboardDocument, DashboardMeta, DashboardSaved, DataSource, DataSourceCreated,
    SearchHit, DASHBOARD_HIT_TYPE,
};
