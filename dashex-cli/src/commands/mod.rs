pub mod pull;
pub mod push;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dashex_client::{ClientConfig, Credentials};
use dashex_core::FileConfig;

/// Connection and location flags shared by every command.
#[derive(Args, Debug, Default)]
pub struct InstanceArgs {
    /// Base URL of the Grafana instance, e.g. `http://localhost:3000`.
    #[arg(short = 'i', long = "instance")]
    pub instance: Option<String>,

    /// Basic-auth username.
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Basic-auth password.
    #[arg(short = 'p', long = "password")]
    pub password: Option<String>,

    /// Directory holding the `grafana/` tree [default: .]
    #[arg(short = 'o', long = "output")]
    pub root: Option<PathBuf>,

    /// YAML file providing `instance`, `username`, `password` and `root`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Flags merged with the optional config file.
#[derive(Debug)]
pub struct Resolved {
    pub client: ClientConfig,
    pub root: PathBuf,
}

impl InstanceArgs {
    pub fn resolve(self) -> Result<Resolved> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    fn merge(self, file: FileConfig) -> Result<Resolved> {
        let instance = self
            .instance
            .or(file.instance)
            .context("no Grafana instance given; pass -i/--instance or set `instance` in --config")?;

        let mut client = ClientConfig::new(instance, user_agent());
        if let Some(username) = self.username.or(file.username) {
            let password = self.password.or(file.password).unwrap_or_default();
            client = client.with_credentials(Credentials::new(username, password));
        }

        let root = self
            .root
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Resolved { client, root })
    }
}

fn user_agent() -> String {
    format!("dashex/{}", env!("CARGO_PKG_VERSION"))
}
