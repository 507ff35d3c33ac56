//! dashex: keep Grafana configuration in a directory of JSON documents.
//!
//! # Usage
//!
//! ```text
//! dashex --version
//! dashex grafana-pull -i <url> -u <user> -p <pass> -o <output_path> [--dry-run]
//! dashex grafana-push -i <url> -u <user> -p <pass> -o <input_path> [--wait-timeout <secs>] [--force]
//! ```
//!
//! Both commands also accept `--config <file.yaml>`; flags win over the file.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{pull::PullArgs, push::PushArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dashex",
    version,
    about = "Pull and push Grafana data sources and dashboards as JSON files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download data sources and dashboards into `<output>/grafana/`.
    GrafanaPull(PullArgs),

    /// Create or update data sources and dashboards from `<output>/grafana/`.
    GrafanaPush(PushArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Commands::GrafanaPull(args) => args.run()?,
        Commands::GrafanaPush(args) => args.run()?,
    }
    println!("DONE!");
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
