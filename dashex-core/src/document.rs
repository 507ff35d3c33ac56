//! Normalized JSON rendering and loading of on-disk documents.
//!
//! Rendering goes through [`serde_json::Value`] so object keys come out
//! sorted at every depth: 2-space indent, `": "` between key and value,
//! one trailing newline.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{io_err, CoreError};

/// Render `doc` in the normalized on-disk format.
pub fn render<T: Serialize>(doc: &T) -> Result<String, CoreError> {
    let value = serde_json::to_value(doc).map_err(CoreError::Render)?;
    let mut out = serde_json::to_string_pretty(&value).map_err(CoreError::Render)?;
    out.push('\n');
    Ok(out)
}

/// Read and parse a JSON document from `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
