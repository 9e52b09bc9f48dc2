//! Error type for the proposal app.
//!
//! The positioning and sequencing core is total; only the outer shell
//! (terminal, config file, log sink) can fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the application shell.
#[derive(Debug)]
pub enum ProposalError {
    /// Terminal setup/teardown or file I/O failed.
    Io(io::Error),

    /// A config file could not be read or parsed.
    Config {
        /// The config file path.
        path: PathBuf,
        /// What went wrong while reading it.
        source: ConfigSource,
    },

    /// The config parsed but describes something unusable.
    InvalidConfig(String),

    /// The log subscriber could not be installed.
    Telemetry(String),
}

/// Underlying cause of a [`ProposalError::Config`].
#[derive(Debug)]
pub enum ConfigSource {
    Read(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "read failed: {e}"),
            Self::Parse(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl fmt::Display for ProposalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config { path, source } => {
                write!(f, "config file '{}': {source}", path.display())
            }
            Self::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            Self::Telemetry(reason) => write!(f, "could not start logging: {reason}"),
        }
    }
}

impl std::error::Error for ProposalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { source, .. } => match source {
                ConfigSource::Read(e) => Some(e),
                ConfigSource::Parse(e) => Some(e),
            },
            Self::InvalidConfig(_) | Self::Telemetry(_) => None,
        }
    }
}

impl From<io::Error> for ProposalError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Convenience alias used across the shell.
pub type Result<T> = std::result::Result<T, ProposalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_mentions_path() {
        let err = ProposalError::Config {
            path: PathBuf::from("/tmp/proposal.json"),
            source: ConfigSource::Read(io::Error::new(io::ErrorKind::NotFound, "missing")),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/proposal.json"));
        assert!(msg.contains("missing"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_conversion() {
        let err: ProposalError = io::Error::new(io::ErrorKind::Other, "tty gone").into();
        assert!(matches!(err, ProposalError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: tty gone");
    }
}
