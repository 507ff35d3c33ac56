//! # dashex-client
//!
//! Typed, blocking access to a Grafana instance's REST API.
//!
//! [`HttpClient`] implements [`GrafanaApi`] with `ureq`;
//! [`wait_until_ready`] polls the instance until it accepts connections.

pub mod api;
pub mod error;
pub mod http;
pub mod wait;

pub use api::GrafanaApi;
pub use error::{ApiError, VERSION_CONFLICT};
pub use http::{ClientConfig, Credentials, HttpClient, DEFAULT_TIMEOUT};
pub use wait::{wait_until_ready, Clock, SystemClock, POLL_INTERVAL};
