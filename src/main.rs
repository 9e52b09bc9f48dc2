mod animation;
mod app;
mod config;
mod error;
mod input;
mod positioning;
mod render;
mod state;
mod telemetry;

use std::path::PathBuf;

use clap::Parser;

use app::App;
use config::AppConfig;
use error::Result;

/// Proposal: a terminal love letter with a "no" button that refuses to be clicked
///
/// Walks through a few timed screens, then asks the question. The decline
/// button runs from the mouse; the accept button ends in fireworks.
#[derive(Parser, Debug)]
#[command(name = "proposal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (messages, timing, photos, evasion, fireworks)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for repeatable button placement and fireworks
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds each intro screen stays up
    #[arg(long, value_name = "SECS")]
    step_secs: Option<f64>,

    /// Hide the photo wall behind the question
    #[arg(long)]
    no_photos: bool,

    /// Skip the fireworks after acceptance
    #[arg(long)]
    no_fireworks: bool,

    /// Append logs to this file (the terminal is taken by the UI)
    #[arg(long, value_name = "FILE", env = "PROPOSAL_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (or defaults) and layer flags on top
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.step_secs {
            config.timing.step_duration_ms = (secs.max(0.0) * 1000.0).round() as u64;
        }
        if self.no_photos {
            config.photos.enabled = false;
        }
        if self.no_fireworks {
            config.fireworks.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    telemetry::init(cli.log_file.as_deref())?;
    tracing::info!(seed = ?config.seed, "starting");

    let mut app = App::new(config);
    app.run().await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
