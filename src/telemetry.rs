//! Log output.
//!
//! The terminal belongs to the UI, so events go to a file:
//! - no log file → nothing is installed (tracing macros are no-ops)
//! - a path → plain-text events appended to that file
//!
//! The level filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{ProposalError, Result};

/// Install the file subscriber when a path is given.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| ProposalError::Telemetry(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
