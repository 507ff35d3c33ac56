//! On-disk configuration tree.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   grafana/
//!     datasources/
//!       <name>.json
//!     dashboards/
//!       <slug>.json
//! ```
//!
//! Path helpers are pure and trust their key; callers holding a name or slug
//! from the service run it through [`check_key`] first. Only [`ensure_dir`]
//! and [`list_documents`] touch the filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

pub const GRAFANA_DIR: &str = "grafana";
pub const DATASOURCES_DIR: &str = "datasources";
pub const DASHBOARDS_DIR: &str = "dashboards";
pub const DOCUMENT_EXTENSION: &str = "json";

/// `<root>/grafana/`
pub fn grafana_root(root: &Path) -> PathBuf {
    root.join(GRAFANA_DIR)
}

/// `<root>/grafana/datasources/`
pub fn datasources_dir(root: &Path) -> PathBuf {
    grafana_root(root).join(DATASOURCES_DIR)
}

/// `<root>/grafana/dashboards/`
pub fn dashboards_dir(root: &Path) -> PathBuf {
    grafana_root(root).join(DASHBOARDS_DIR)
}

/// `<root>/grafana/datasources/<name>.json`
pub fn datasource_path(root: &Path, name: &str) -> PathBuf {
    datasources_dir(root).join(format!("{name}.{DOCUMENT_EXTENSION}"))
}

/// `<root>/grafana/dashboards/<slug>.json`
pub fn dashboard_path(root: &Path, slug: &str) -> PathBuf {
    dashboards_dir(root).join(format!("{slug}.{DOCUMENT_EXTENSION}"))
}

/// Accept `key` only if it names a single file directly inside its document
/// directory: non-empty, not `.` or `..`, no path separators or NUL.
pub fn check_key(key: &str) -> Result<&str, CoreError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(CoreError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(key)
}

/// Create a single directory level if it does not already exist.
///
/// Returns `true` when the directory was created by this call. An
/// "already exists" failure counts as success; every other failure is
/// returned.
pub fn ensure_dir(path: &Path) -> Result<bool, CoreError> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Every `*.json` file directly inside `dir`, sorted by path.
///
/// A missing directory has no documents.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(err) => return Err(io_err(dir, err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if is_file && is_json {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
