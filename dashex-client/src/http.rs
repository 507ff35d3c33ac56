//! Blocking HTTP implementation of [`GrafanaApi`] on top of `ureq`.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use dashex_core::{DashboardDocument, DashboardSaved, DataSource, DataSourceCreated, SearchHit};

use crate::api::GrafanaApi;
use crate::error::ApiError;

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", BASE64.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to reach one instance. Built once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    /// Sent as `User-Agent`, e.g. `dashex/0.2.0`.
    pub user_agent: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            user_agent: user_agent.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Error body shape used by the service for most failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Synchronous REST client for one instance.
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: Option<String>,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: config.credentials.as_ref().map(Credentials::header_value),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send<B: Serialize>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<(String, ureq::Response), ApiError> {
        let url = self.url(path);
        let mut request = self.agent.request(method, &url);
        if let Some(authorization) = &self.authorization {
            request = request.set("Authorization", authorization);
        }

        tracing::debug!("{method} {url}");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        match result {
            Ok(response) => Ok((url, response)),
            Err(err) => Err(classify(method, url, err)),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (url, response) = self.send::<()>("GET", path, None)?;
        decode(url, response)
    }
}

fn decode<T: DeserializeOwned>(url: String, response: ureq::Response) -> Result<T, ApiError> {
    response
        .into_json()
        .map_err(|source| ApiError::Decode { url, source })
}

fn classify(method: &'static str, url: String, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Status {
                method,
                url,
                status,
                message: error_message(&body),
            }
        }
        ureq::Error::Transport(transport) => match transport.kind() {
            ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => ApiError::Unreachable {
                url,
                message: transport.to_string(),
            },
            _ => ApiError::Transport {
                method,
                url,
                message: transport.to_string(),
            },
        },
    }
}

/// The service's `{"message": ...}` when present, else the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "<empty body>".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

impl GrafanaApi for HttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ping(&self) -> Result<(), ApiError> {
        self.send::<()>("GET", "api/admin/stats", None)?;
        Ok(())
    }

    fn list_datasources(&self) -> Result<Vec<DataSource>, ApiError> {
        self.get_json("api/datasources")
    }

    fn create_datasource(&self, datasource: &DataSource) -> Result<DataSourceCreated, ApiError> {
        let (url, response) = self.send("POST", "api/datasources", Some(datasource))?;
        decode(url, response)
    }

    fn update_datasource(&self, id: u64, datasource: &DataSource) -> Result<(), ApiError> {
        self.send("PUT", &format!("api/datasources/{id}"), Some(datasource))?;
        Ok(())
    }

    fn delete_datasource(&self, name: &str) -> Result<(), ApiError> {
        self.send::<()>("DELETE", &format!("api/datasources/name/{}", encode(name)), None)?;
        Ok(())
    }

    fn search(&self) -> Result<Vec<SearchHit>, ApiError> {
        self.get_json("api/search")
    }

    fn get_dashboard(&self, slug: &str) -> Result<DashboardDocument, ApiError> {
        self.get_json(&format!("api/dashboards/db/{}", encode(slug)))
    }

    fn save_dashboard(&self, document: &DashboardDocument) -> Result<DashboardSaved, ApiError> {
        let (url, response) = self.send("POST", "api/dashboards/db", Some(document))?;
        decode(url, response)
    }
}
