//! Document types exchanged with the dashboard service and stored on disk.
//!
//! Each document type types the fields reconciliation depends on and keeps
//! every other field in a flattened map, so a pull/push round trip never
//! drops configuration the service returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search hit type for a regular, editable dashboard.
pub const DASHBOARD_HIT_TYPE: &str = "dash-db";

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// A data source as listed by `GET /api/datasources` or stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Instance-assigned identifier. Never stored on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Owning organisation. Never stored on disk.
    #[serde(rename = "orgId", default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,

    /// Unique name; the reconciliation key.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    /// Never stored on disk.
    #[serde(rename = "typeLogoUrl", default, skip_serializing_if = "Option::is_none")]
    pub type_logo_url: Option<String>,

    /// Only set on outgoing updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    /// `url`, `database`, `access`, `basicAuth`, `user`, `password`,
    /// `jsonData` and anything else the service returns.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DataSource {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            org_id: None,
            name: name.into(),
            kind: kind.into(),
            type_logo_url: None,
            overwrite: None,
            fields: Map::new(),
        }
    }

    /// Drop the fields that only make sense on the instance they came from.
    pub fn strip_instance_fields(&mut self) {
        self.id = None;
        self.org_id = None;
        self.type_logo_url = None;
    }
}

/// Response body of `POST /api/datasources`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceCreated {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Dashboards
// ---------------------------------------------------------------------------

/// The `dashboard` sub-object of a dashboard document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dashboard {
    /// Instance-assigned identifier. Absent on disk; absent on push means
    /// "create".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Local bookkeeping stored next to a pulled dashboard. Never pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// `created`, `createdBy`, `updated`, `updatedBy`, `expires`, ...
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A full dashboard document as returned by `GET /api/dashboards/db/<slug>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub dashboard: Dashboard,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DashboardMeta>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DashboardDocument {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            meta: None,
            fields: Map::new(),
        }
    }

    /// The slug recorded in `meta`, if any.
    pub fn slug(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.slug.as_deref())
    }

    /// Record `slug` in `meta`, creating `meta` if needed.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.meta.get_or_insert_with(DashboardMeta::default).slug = Some(slug.into());
    }

    /// Human-readable label for logs.
    pub fn title(&self) -> &str {
        self.dashboard.title.as_deref().unwrap_or("<untitled>")
    }
}

/// Response body of `POST /api/dashboards/db`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct DashboardSaved {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One entry of `GET /api/search`. Folders and the built-in home dashboard
/// show up here too, so every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SearchHit {
    /// Slug of an editable dashboard: the part of `uri` after the first `/`.
    ///
    /// Returns `None` for any other kind of hit.
    pub fn dashboard_slug(&self) -> Option<&str> {
        if self.kind != DASHBOARD_HIT_TYPE {
            return None;
        }
        self.uri
            .as_deref()
            .and_then(|uri| uri.split_once('/'))
            .map(|(_, slug)| slug)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
