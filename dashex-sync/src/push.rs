//! Push on-disk configuration up to the service.
//!
//! Data sources are reconciled by name and dashboards by slug against maps
//! built from the live inventory at the start of each phase. A known key
//! becomes an update of the existing id, an unknown key a create. Every data
//! source is pushed before any dashboard since dashboards may reference
//! data sources by name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dashex_client::{wait_until_ready, ApiError, Clock, GrafanaApi};
use dashex_core::{document, layout, DashboardDocument, DataSource};

use crate::error::SyncError;

/// Knobs for a push run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// How long to wait for the instance to accept connections.
    /// `None` waits forever.
    pub wait_timeout: Option<Duration>,
    /// Sent as `overwrite` on data source updates.
    pub force_overwrite: bool,
}

/// Which kind of document a [`PushedDocument`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    DataSource,
    Dashboard,
}

/// What happened to one local document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Created { id: Option<u64> },
    Updated { id: u64 },
    /// The service refused the save as a version conflict.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushedDocument {
    pub kind: DocumentKind,
    /// Data source name or dashboard slug.
    pub key: String,
    pub path: PathBuf,
    pub outcome: PushOutcome,
}

/// Outcome of a push run, in processing order.
#[derive(Debug, Default)]
pub struct PushReport {
    pub documents: Vec<PushedDocument>,
}

/// Push every local data source and dashboard under `root` to `api`.
pub fn push<A, C>(
    api: &A,
    clock: &mut C,
    root: &Path,
    options: &PushOptions,
) -> Result<PushReport, SyncError>
where
    A: GrafanaApi + ?Sized,
    C: Clock + ?Sized,
{
    wait_until_ready(api, clock, options.wait_timeout)?;

    let mut report = PushReport::default();

    let datasource_ids = datasource_ids(api)?;
    for path in layout::list_documents(&layout::datasources_dir(root))? {
        let datasource: DataSource = document::load(&path)?;
        let pushed = push_datasource(api, &datasource_ids, datasource, path, options)?;
        report.documents.push(pushed);
    }

    let dashboard_ids = dashboard_ids(api)?;
    tracing::debug!(?dashboard_ids, "remote dashboards");
    for path in layout::list_documents(&layout::dashboards_dir(root))? {
        let dashboard: DashboardDocument = document::load(&path)?;
        let pushed = push_dashboard(api, &dashboard_ids, dashboard, path)?;
        report.documents.push(pushed);
    }

    Ok(report)
}

/// `name → id` for every data source on the instance.
pub fn datasource_ids<A>(api: &A) -> Result<BTreeMap<String, u64>, SyncError>
where
    A: GrafanaApi + ?Sized,
{
    Ok(api
        .list_datasources()?
        .into_iter()
        .filter_map(|ds| ds.id.map(|id| (ds.name, id)))
        .collect())
}

/// `slug → id` for every editable dashboard on the instance.
pub fn dashboard_ids<A>(api: &A) -> Result<BTreeMap<String, u64>, SyncError>
where
    A: GrafanaApi + ?Sized,
{
    Ok(api
        .search()?
        .iter()
        .filter_map(|hit| Some((hit.dashboard_slug()?.to_string(), hit.id?)))
        .collect())
}

fn push_datasource<A>(
    api: &A,
    ids: &BTreeMap<String, u64>,
    mut datasource: DataSource,
    path: PathBuf,
    options: &PushOptions,
) -> Result<PushedDocument, SyncError>
where
    A: GrafanaApi + ?Sized,
{
    let outcome = match ids.get(&datasource.name) {
        Some(&id) => {
            datasource.id = Some(id);
            datasource.overwrite = Some(options.force_overwrite);
            tracing::info!("updating data source \"{}\" with ID #{id}", datasource.name);
            api.update_datasource(id, &datasource)?;
            PushOutcome::Updated { id }
        }
        None => {
            let created = api.create_datasource(&datasource)?;
            tracing::info!(
                "created data source \"{}\" with ID #{}",
                datasource.name,
                created.id
            );
            PushOutcome::Created {
                id: Some(created.id),
            }
        }
    };

    Ok(PushedDocument {
        kind: DocumentKind::DataSource,
        key: datasource.name,
        path,
        outcome,
    })
}

fn push_dashboard<A>(
    api: &A,
    ids: &BTreeMap<String, u64>,
    mut dashboard: DashboardDocument,
    path: PathBuf,
) -> Result<PushedDocument, SyncError>
where
    A: GrafanaApi + ?Sized,
{
    let slug = match dashboard.slug() {
        Some(slug) => slug.to_string(),
        None => return Err(SyncError::MissingSlug { path }),
    };
    dashboard.meta = None;
    dashboard.dashboard.id = ids.get(&slug).copied();

    match dashboard.dashboard.id {
        Some(id) => tracing::info!(
            "updating dashboard \"{}\" with slug \"{slug}\" and ID #{id}",
            dashboard.title()
        ),
        None => tracing::info!(
            "creating dashboard \"{}\" with slug \"{slug}\"",
            dashboard.title()
        ),
    }

    let outcome = match api.save_dashboard(&dashboard) {
        Ok(saved) => match dashboard.dashboard.id {
            Some(id) => PushOutcome::Updated { id },
            None => PushOutcome::Created { id: saved.id },
        },
        Err(err) if err.is_version_conflict() => {
            tracing::warn!(error = %err, "skipping dashboard \"{slug}\"");
            let reason = match &err {
                ApiError::Status { message, .. } => message.clone(),
                other => other.to_string(),
            };
            PushOutcome::Skipped { reason }
        }
        Err(err) => return Err(err.into()),
    };

    Ok(PushedDocument {
        kind: DocumentKind::Dashboard,
        key: slug,
        path,
        outcome,
    })
}
