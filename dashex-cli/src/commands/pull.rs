//! `dashex grafana-pull`: write live configuration to disk.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use dashex_client::{GrafanaApi, HttpClient};
use dashex_sync::{pull, PullOptions, PullReport, WriteResult};

use super::InstanceArgs;

/// Arguments for `dashex grafana-pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    /// Show what would be written without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}

impl PullArgs {
    pub fn run(self) -> Result<()> {
        let resolved = self.instance.resolve()?;
        let client = HttpClient::new(resolved.client);
        let options = PullOptions {
            dry_run: self.dry_run,
        };

        let report = pull(&client, &resolved.root, &options)
            .with_context(|| format!("pull from {} failed", client.base_url()))?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &PullReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let unchanged = report
        .writes()
        .filter(|r| matches!(r, WriteResult::Unchanged { .. }))
        .count();
    let total = report.writes().count();

    println!(
        "{prefix}{} pulled {} data source(s), {} dashboard(s) ({} written, {} unchanged, {} search hit(s) skipped)",
        "✓".green().bold(),
        report.datasources.len(),
        report.dashboards.len(),
        total - unchanged,
        unchanged,
        report.skipped_hits,
    );

    for r in report.writes() {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => {
                println!("  {}  {}", "·".bright_black(), path.display())
            }
        }
    }
}
