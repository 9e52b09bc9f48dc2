//! Application configuration.
//!
//! Loaded from an optional JSON file. Every field has a default, so a partial
//! file (or `{}`) is valid; missing file means all defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigSource, ProposalError, Result};
use crate::positioning::{CellSize, ForbiddenZone};

/// Number of photos in the default wall
const DEFAULT_PHOTO_COUNT: usize = 36;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub messages: Messages,
    pub timing: TimingConfig,
    pub photos: PhotoConfig,
    pub evasion: EvasionConfig,
    pub fireworks: FireworksConfig,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

/// All user-visible text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub congratulations: String,
    pub warning: String,
    pub question: String,
    pub celebration: String,
    pub footer: String,
    pub accept_label: String,
    pub decline_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            congratulations: "Congratulations! You have completed the game.".to_string(),
            warning: "I have to ask you a serious question, be ready!".to_string(),
            question: "Will you be my Valentine?".to_string(),
            celebration: "Thank you, I love you! ♥".to_string(),
            footer: "How are you feeling? write me!!! ✉".to_string(),
            accept_label: "Yes, I will! ♥".to_string(),
            decline_label: "No, I won't".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long each timed step stays on screen
    pub step_duration_ms: u64,
    /// How long the evasive button takes to glide to its new spot
    pub glide_ms: u64,
}

impl TimingConfig {
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn glide(&self) -> Duration {
        Duration::from_millis(self.glide_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: 5000,
            glide_ms: 250,
        }
    }
}

/// Photo wall behind the question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    pub enabled: bool,
    pub columns: u16,
    pub paths: Vec<String>,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            columns: 6,
            paths: (1..=DEFAULT_PHOTO_COUNT)
                .map(|i| format!("/game-photos/{i}.jpeg"))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    pub zone: ForbiddenZone,
    /// Pointer distance (pixels) that makes the button flee
    pub threshold_px: f32,
    /// Minimum spacing between processed pointer moves
    pub throttle_ms: u64,
    /// Pixel size of a terminal cell
    pub cell_size: CellSize,
}

impl EvasionConfig {
    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            zone: ForbiddenZone::default(),
            threshold_px: 120.0,
            throttle_ms: 100,
            cell_size: CellSize::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    pub enabled: bool,
    pub max_particles: usize,
    /// Delay between rocket launches
    pub launch_interval_ms: u64,
}

impl FireworksConfig {
    pub fn launch_interval(&self) -> Duration {
        Duration::from_millis(self.launch_interval_ms)
    }
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_particles: 400,
            launch_interval_ms: 600,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ProposalError::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Read(e),
        })?;
        let config = Self::from_json(&text).map_err(|e| ProposalError::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Parse(e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject values the sequence cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.evasion.zone.is_valid() {
            return Err(ProposalError::InvalidConfig(format!(
                "forbidden zone {:?} must have min < max inside 0..=100",
                self.evasion.zone
            )));
        }
        if self.evasion.threshold_px.is_nan() || self.evasion.threshold_px <= 0.0 {
            return Err(ProposalError::InvalidConfig(
                "evasion.threshold_px must be positive".to_string(),
            ));
        }
        if self.evasion.cell_size.width <= 0.0 || self.evasion.cell_size.height <= 0.0 {
            return Err(ProposalError::InvalidConfig(
                "evasion.cell_size must be positive".to_string(),
            ));
        }
        if self.photos.enabled && self.photos.columns == 0 {
            return Err(ProposalError::InvalidConfig(
                "photos.columns must be at least 1".to_string(),
            ));
        }
        if self.timing.step_duration_ms == 0 {
            return Err(ProposalError::InvalidConfig(
                "timing.step_duration_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
