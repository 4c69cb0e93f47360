use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smbfilter::config::{FilterSettings, GeminiCredential};
use smbfilter::filter::{BatchFilter, JobRecord};
use smbfilter::web::start_web_server;
use std::path::PathBuf;
use tracing::{info, warn};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "smbfilter")]
#[command(about = "Filter job postings down to small/medium-business employers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Filter a JSON file of job records and print the kept records
    Filter {
        input: PathBuf,
        /// Skip scraping of apply links
        #[arg(long)]
        no_scrape: bool,
        /// Override the pacing delay between postings, in seconds
        #[arg(long)]
        delay: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("smbfilter=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();

    let settings = FilterSettings::load()?;
    let credential = GeminiCredential::from_env();
    if !credential.is_configured() {
        warn!("GEMINI_API_KEY not set: classification degrades to the denylist and default verdicts");
    }

    match cli.command {
        Command::Serve { port } => start_web_server(settings, credential, port).await,
        Command::Filter {
            input,
            no_scrape,
            delay,
        } => {
            let mut settings = settings;
            if no_scrape {
                settings = settings.with_scrape_links(false);
            }
            if let Some(delay) = delay {
                settings = settings.with_request_delay_secs(delay);
            }

            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let jobs: Vec<JobRecord> =
                serde_json::from_str(&content).context("Failed to parse job records")?;

            let filter = BatchFilter::new(settings, &credential)?;
            let outcome = filter.run(jobs).await;
            info!(
                "Kept {}/{} postings",
                outcome.summary.kept, outcome.summary.total
            );

            println!("{}", serde_json::to_string_pretty(&outcome.jobs)?);
            Ok(())
        }
    }
}
