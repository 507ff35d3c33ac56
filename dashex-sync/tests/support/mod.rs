//! In-memory Grafana stand-in shared by the pull and push tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use dashex_client::{ApiError, Clock, GrafanaApi};
use dashex_core::{
    Dashboard, DashboardDocument, DashboardMeta, DashboardSaved, DataSource, DataSourceCreated,
    SearchHit, DASHBOARD_HIT_TYPE,
};
use serde_json::json;

pub const URL: &str = "http://grafana.test";

/// Stored dashboard: id plus the last saved `dashboard` object.
#[derive(Debug, Clone)]
pub struct StoredDashboard {
    pub id: u64,
    pub dashboard: Dashboard,
}

#[derive(Default)]
pub struct FakeGrafana {
    pub datasources: RefCell<Vec<DataSource>>,
    pub dashboards: RefCell<BTreeMap<String, StoredDashboard>>,
    /// Returned by search in addition to the stored dashboards.
    pub extra_hits: RefCell<Vec<SearchHit>>,
    /// Scripted probe outcomes; an empty script means "ready".
    pub probes: RefCell<VecDeque<Result<(), ApiError>>>,
    /// Forces every dashboard save to fail with this status.
    pub fail_saves_with: Cell<Option<u16>>,
    /// `"<METHOD> <path>"` for every call, in order.
    pub calls: RefCell<Vec<String>>,
    /// Bodies sent to `PUT /api/datasources/<id>`.
    pub updates: RefCell<Vec<DataSource>>,
    /// Bodies sent to `POST /api/dashboards/db`.
    pub saves: RefCell<Vec<DashboardDocument>>,
    next_id: Cell<u64>,
}

impl FakeGrafana {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.next_id.set(1);
        fake
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Seed a data source the way the service would list it.
    pub fn add_datasource(&self, name: &str, url: &str, database: &str) -> u64 {
        let id = self.allocate_id();
        let ds: DataSource = serde_json::from_value(json!({
            "id": id,
            "orgId": 1,
            "name": name,
            "type": "influxdb",
            "typeLogoUrl": "public/app/plugins/datasource/influxdb/img/influxdb_logo.svg",
            "access": "proxy",
            "url": url,
            "password": "",
            "user": "",
            "database": database,
            "basicAuth": false,
            "isDefault": false,
            "jsonData": {}
        }))
        .expect("seed datasource");
        self.datasources.borrow_mut().push(ds);
        id
    }

    /// Seed a dashboard at `version`.
    pub fn add_dashboard(&self, title: &str, version: i64) -> (String, u64) {
        let slug = slugify(title);
        let id = self.allocate_id();
        let dashboard: Dashboard = serde_json::from_value(json!({
            "id": id,
            "title": title,
            "version": version,
            "schemaVersion": 14,
            "timezone": "browser",
            "tags": [],
            "rows": []
        }))
        .expect("seed dashboard");
        self.dashboards
            .borrow_mut()
            .insert(slug.clone(), StoredDashboard { id, dashboard });
        (slug, id)
    }

    pub fn dashboard(&self, slug: &str) -> Option<StoredDashboard> {
        self.dashboards.borrow().get(slug).cloned()
    }

    pub fn datasource(&self, name: &str) -> Option<DataSource> {
        self.datasources
            .borrow()
            .iter()
            .find(|ds| ds.name == name)
            .cloned()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn status(method: &'static str, path: &str, status: u16, message: &str) -> ApiError {
        ApiError::Status {
            method,
            url: format!("{URL}/{path}"),
            status,
            message: message.to_string(),
        }
    }
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

pub fn refused() -> ApiError {
    ApiError::Unreachable {
        url: format!("{URL}/api/admin/stats"),
        message: "Connection refused (os error 111)".to_string(),
    }
}

impl GrafanaApi for FakeGrafana {
    fn base_url(&self) -> &str {
        URL
    }

    fn ping(&self) -> Result<(), ApiError> {
        self.record("GET api/admin/stats");
        self.probes.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn list_datasources(&self) -> Result<Vec<DataSource>, ApiError> {
        self.record("GET api/datasources");
        Ok(self.datasources.borrow().clone())
    }

    fn create_datasource(&self, datasource: &DataSource) -> Result<DataSourceCreated, ApiError> {
        self.record("POST api/datasources");
        if self.datasource(&datasource.name).is_some() {
            return Err(Self::status(
                "POST",
                "api/datasources",
                409,
                "Data source with same name already exists",
            ));
        }
        let id = self.allocate_id();
        let mut stored = datasource.clone();
        stored.id = Some(id);
        stored.org_id = Some(1);
        self.datasources.borrow_mut().push(stored);
        Ok(DataSourceCreated {
            id,
            name: Some(datasource.name.clone()),
            message: Some("Datasource added".to_string()),
        })
    }

    fn update_datasource(&self, id: u64, datasource: &DataSource) -> Result<(), ApiError> {
        let path = format!("api/datasources/{id}");
        self.record(format!("PUT {path}"));
        self.updates.borrow_mut().push(datasource.clone());
        let mut all = self.datasources.borrow_mut();
        let Some(existing) = all.iter_mut().find(|ds| ds.id == Some(id)) else {
            return Err(Self::status("PUT", &path, 404, "Data source not found"));
        };
        let mut stored = datasource.clone();
        stored.overwrite = None;
        stored.org_id = existing.org_id;
        *existing = stored;
        Ok(())
    }

    fn delete_datasource(&self, name: &str) -> Result<(), ApiError> {
        self.record(format!("DELETE api/datasources/name/{name}"));
        self.datasources.borrow_mut().retain(|ds| ds.name != name);
        Ok(())
    }

    fn search(&self) -> Result<Vec<SearchHit>, ApiError> {
        self.record("GET api/search");
        let mut hits: Vec<SearchHit> = self
            .dashboards
            .borrow()
            .iter()
            .map(|(slug, stored)| SearchHit {
                id: Some(stored.id),
                kind: DASHBOARD_HIT_TYPE.to_string(),
                uri: Some(format!("db/{slug}")),
                title: stored.dashboard.title.clone(),
            })
            .collect();
        hits.extend(self.extra_hits.borrow().iter().cloned());
        Ok(hits)
    }

    fn get_dashboard(&self, slug: &str) -> Result<DashboardDocument, ApiError> {
        let path = format!("api/dashboards/db/{slug}");
        self.record(format!("GET {path}"));
        let Some(stored) = self.dashboard(slug) else {
            return Err(Self::status("GET", &path, 404, "Dashboard not found"));
        };
        let mut meta = DashboardMeta {
            slug: Some(slug.to_string()),
            ..DashboardMeta::default()
        };
        for (key, value) in [
            ("type", json!("db")),
            ("canSave", json!(true)),
            ("created", json!("2017-06-01T10:00:00Z")),
            ("createdBy", json!("admin")),
            ("updated", json!("2017-06-02T10:00:00Z")),
            ("updatedBy", json!("admin")),
            ("expires", json!("0001-01-01T00:00:00Z")),
        ] {
            meta.fields.insert(key.to_string(), value);
        }
        let mut document = DashboardDocument::new(stored.dashboard);
        document.meta = Some(meta);
        Ok(document)
    }

    fn save_dashboard(&self, document: &DashboardDocument) -> Result<DashboardSaved, ApiError> {
        const PATH: &str = "api/dashboards/db";
        self.record(format!("POST {PATH}"));
        self.saves.borrow_mut().push(document.clone());
        if let Some(status) = self.fail_saves_with.get() {
            return Err(Self::status("POST", PATH, status, "Service Unavailable"));
        }

        let title = document.dashboard.title.clone().unwrap_or_default();
        let slug = slugify(&title);
        let incoming = document.dashboard.version.unwrap_or(0);
        let mut dashboards = self.dashboards.borrow_mut();

        let id = match (document.dashboard.id, dashboards.get(&slug)) {
            (Some(id), Some(existing)) => {
                if incoming < existing.dashboard.version.unwrap_or(0) {
                    return Err(Self::status(
                        "POST",
                        PATH,
                        412,
                        "The dashboard has been changed by someone else",
                    ));
                }
                id
            }
            (None, Some(_)) => {
                return Err(Self::status(
                    "POST",
                    PATH,
                    412,
                    "A dashboard with the same name already exists",
                ))
            }
            (_, None) => self.allocate_id(),
        };

        let mut dashboard = document.dashboard.clone();
        dashboard.id = Some(id);
        dashboard.version = Some(incoming + 1);
        let version = dashboard.version;
        dashboards.insert(slug.clone(), StoredDashboard { id, dashboard });
        Ok(DashboardSaved {
            id: Some(id),
            slug: Some(slug),
            status: Some("success".to_string()),
            version,
        })
    }
}

/// Clock that never blocks: time advances only by the recorded sleeps.
#[derive(Debug, Default)]
pub struct FakeClock {
    pub elapsed: Duration,
    pub sleeps: Vec<Duration>,
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.sleeps.push(duration);
    }
}
