//! redressd — grievance triage daemon.
//!
//! `run` keeps the escalation sweeper on its configured interval, `sweep`
//! runs a single sweep, and `submit` files a complaint and categorizes it
//! in place.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use redress::classify::Categorizer;
use redress::config::RedressConfig;
use redress::escalation::EscalationSweeper;
use redress::model::Complaint;
use redress::predictor::{AiPredictor, NullPredictor, OllamaPredictor};
use redress::scheduler;
use redress::seed;
use redress::store::file::FileStore;
use redress::store::CategoryStore;

#[derive(Parser, Debug)]
#[command(
    name = "redressd",
    about = "Complaint categorization and SLA escalation daemon"
)]
struct Args {
    /// Path to a TOML config file; env/defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the escalation sweeper on its configured interval (default)
    Run,
    /// Run a single escalation sweep and exit
    Sweep,
    /// File a new complaint and categorize it
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RedressConfig::load(path)?,
        None => {
            let config = RedressConfig::default();
            config.validate()?;
            config
        }
    };

    let store = Arc::new(
        FileStore::open(&config.state_path)
            .with_context(|| format!("opening state file {}", config.state_path.display()))?,
    );
    if store.seed_categories(seed::default_categories())? {
        tracing::info!(
            "seeded default categories into {}",
            config.state_path.display()
        );
    }

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let sweeper =
                EscalationSweeper::new(store.clone(), store.clone(), store.clone(), &config);
            let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
            let loop_handle = tokio::spawn(scheduler::run_sweep_loop(
                sweeper,
                Duration::from_secs(config.sweep_interval_secs),
                shutdown_rx,
            ));
            tracing::info!(
                "sweep loop started (every {}s, SLA {} days)",
                config.sweep_interval_secs,
                config.sla_days
            );

            tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
            shutdown_tx.send(true).ok();
            loop_handle.await?;
        }
        Command::Sweep => {
            let sweeper =
                EscalationSweeper::new(store.clone(), store.clone(), store.clone(), &config);
            let report = sweeper.sweep(chrono::Utc::now())?;
            tracing::info!(
                "sweep done: {} of {} overdue complaints escalated",
                report.escalated,
                report.examined
            );
        }
        Command::Submit {
            title,
            description,
            location,
        } => {
            let predictor: Arc<dyn AiPredictor> = if config.predictor.enabled {
                let names = store.all()?.into_iter().map(|c| c.name).collect();
                Arc::new(OllamaPredictor::new(&config.predictor, names))
            } else {
                Arc::new(NullPredictor)
            };
            let categorizer =
                Categorizer::new(store.clone(), store.clone(), store.clone(), predictor);

            let mut complaint = Complaint::new(&title, &description, config.sla_days);
            complaint.location = location;
            let outcome = categorizer.categorize(&mut complaint).await?;
            tracing::info!(
                "complaint {} filed: category={} priority={} status={}",
                complaint.id,
                outcome.category_name.as_deref().unwrap_or("(none)"),
                outcome.priority,
                outcome.status
            );
        }
    }

    Ok(())
}
