//! Pull live configuration down to disk.
//!
//! 1. Ensure `<root>/grafana/{datasources,dashboards}` exist.
//! 2. Write every data source, minus its instance-specific fields, to
//!    `datasources/<name>.json`.
//! 3. Fetch every editable dashboard found by search, drop `dashboard.id`
//!    and write it, `meta` included, to `dashboards/<slug>.json`.
//!
//! Any service or filesystem error aborts the run, as does a name or slug
//! that would not land directly inside its document directory.

use std::path::Path;

use dashex_client::GrafanaApi;
use dashex_core::{document, layout};

use crate::error::SyncError;
use crate::writer::{write_document, WriteResult};

/// Knobs for a pull run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullOptions {
    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
}

/// Outcome of a pull run.
#[derive(Debug, Default)]
pub struct PullReport {
    pub datasources: Vec<WriteResult>,
    pub dashboards: Vec<WriteResult>,
    /// Search hits that are not editable dashboards (folders, home, ...).
    pub skipped_hits: usize,
}

impl PullReport {
    pub fn writes(&self) -> impl Iterator<Item = &WriteResult> {
        self.datasources.iter().chain(self.dashboards.iter())
    }
}

/// Pull every data source and dashboard from `api` into `root`.
pub fn pull<A>(api: &A, root: &Path, options: &PullOptions) -> Result<PullReport, SyncError>
where
    A: GrafanaApi + ?Sized,
{
    if !options.dry_run {
        prepare_tree(root)?;
    }

    let mut report = PullReport::default();

    for mut datasource in api.list_datasources()? {
        datasource.strip_instance_fields();
        let path = layout::datasource_path(root, layout::check_key(&datasource.name)?);
        let content = document::render(&datasource)?;
        report
            .datasources
            .push(write_document(&path, &content, options.dry_run)?);
    }

    for hit in api.search()? {
        let Some(slug) = hit.dashboard_slug() else {
            tracing::debug!(kind = %hit.kind, "skipping non-dashboard search hit");
            report.skipped_hits += 1;
            continue;
        };
        layout::check_key(slug)?;
        let mut dashboard = api.get_dashboard(slug)?;
        dashboard.dashboard.id = None;
        dashboard.set_slug(slug);
        let path = layout::dashboard_path(root, slug);
        let content = document::render(&dashboard)?;
        report
            .dashboards
            .push(write_document(&path, &content, options.dry_run)?);
    }

    Ok(report)
}

fn prepare_tree(root: &Path) -> Result<(), SyncError> {
    for dir in [
        root.to_path_buf(),
        layout::grafana_root(root),
        layout::datasources_dir(root),
        layout::dashboards_dir(root),
    ] {
        if layout::ensure_dir(&dir)? {
            tracing::info!("created {}", dir.display());
        }
    }
    Ok(())
}
