//! The service operations pull and push are built on.

use dashex_core::{DashboardDocument, DashboardSaved, DataSource, DataSourceCreated, SearchHit};

use crate::error::ApiError;

/// Typed access to the dashboard service's REST API.
///
/// [`crate::HttpClient`] is the real implementation; tests substitute an
/// in-memory instance.
pub trait GrafanaApi {
    /// Base URL of the instance, for messages.
    fn base_url(&self) -> &str;

    /// `GET /api/admin/stats`
    fn ping(&self) -> Result<(), ApiError>;

    /// `GET /api/datasources`
    fn list_datasources(&self) -> Result<Vec<DataSource>, ApiError>;

    /// `POST /api/datasources`
    fn create_datasource(&self, datasource: &DataSource) -> Result<DataSourceCreated, ApiError>;

    /// `PUT /api/datasources/<id>`
    fn update_datasource(&self, id: u64, datasource: &DataSource) -> Result<(), ApiError>;

    /// `DELETE /api/datasources/name/<name>`
    fn delete_datasource(&self, name: &str) -> Result<(), ApiError>;

    /// `GET /api/search`
    fn search(&self) -> Result<Vec<SearchHit>, ApiError>;

    /// `GET /api/dashboards/db/<slug>`
    fn get_dashboard(&self, slug: &str) -> Result<DashboardDocument, ApiError>;

    /// `POST /api/dashboards/db`
    fn save_dashboard(&self, document: &DashboardDocument) -> Result<DashboardSaved, ApiError>;
}
