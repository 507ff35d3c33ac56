//! `dashex grafana-push`: create or update remote documents from disk.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use dashex_client::{GrafanaApi, HttpClient, SystemClock};
use dashex_sync::{push, DocumentKind, PushOptions, PushOutcome, PushReport};

use super::InstanceArgs;

/// Arguments for `dashex grafana-push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    /// Give up if the instance does not accept connections within this many
    /// seconds. Waits forever when omitted.
    #[arg(long, value_name = "SECS")]
    pub wait_timeout: Option<f64>,

    /// Ask the instance to overwrite existing data sources on update.
    #[arg(long)]
    pub force: bool,
}

#[derive(Tabled)]
struct PushTableRow {
    #[tabled(rename = "kind")]
    kind: &'static str,
    #[tabled(rename = "name")]
    key: String,
    #[tabled(rename = "result")]
    result: String,
}

impl PushArgs {
    pub fn run(self) -> Result<()> {
        let wait_timeout = self.wait_timeout.map(parse_wait_timeout).transpose()?;

        let resolved = self.instance.resolve()?;
        let client = HttpClient::new(resolved.client);
        let options = PushOptions {
            wait_timeout,
            force_overwrite: self.force,
        };

        let mut clock = SystemClock::new();
        let report = push(&client, &mut clock, &resolved.root, &options)
            .with_context(|| format!("push to {} failed", client.base_url()))?;
        print_report(&report);
        Ok(())
    }
}

/// `--wait-timeout` seconds as a [`Duration`]. Rejects negative, non-finite
/// and out-of-range values.
fn parse_wait_timeout(secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) => Ok(timeout),
        Err(_) => bail!("--wait-timeout must be a non-negative number of seconds, got {secs}"),
    }
}

fn print_report(report: &PushReport) {
    if report.documents.is_empty() {
        println!("Nothing to push: no grafana/datasources/*.json or grafana/dashboards/*.json found.");
        return;
    }

    let skipped = report
        .documents
        .iter()
        .filter(|d| matches!(d.outcome, PushOutcome::Skipped { .. }))
        .count();
    println!(
        "{} pushed {} document(s), {} skipped",
        "✓".green().bold(),
        report.documents.len() - skipped,
        skipped
    );

    let rows: Vec<PushTableRow> = report
        .documents
        .iter()
        .map(|d| PushTableRow {
            kind: match d.kind {
                DocumentKind::DataSource => "data source",
                DocumentKind::Dashboard => "dashboard",
            },
            key: d.key.clone(),
            result: outcome_label(&d.outcome),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn outcome_label(outcome: &PushOutcome) -> String {
    match outcome {
        PushOutcome::Created { id: Some(id) } => format!("{} #{id}", "created".green()),
        PushOutcome::Created { id: None } => "created".green().to_string(),
        PushOutcome::Updated { id } => format!("{} #{id}", "updated".cyan()),
        PushOutcome::Skipped { reason } => format!("{}: {reason}", "skipped".yellow()),
    }
}
