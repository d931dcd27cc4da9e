//! Configuration loading for the transcript graph.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! Default config file lives at ~/.config/transcript-graph/config.toml.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

const APP_NAME: &str = "transcript-graph";

/// Segmentation and keyword analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Transcript entries per segment window.
    #[serde(default = "default_step")]
    pub step: usize,

    /// A stem becomes a keyword when its count is strictly above this.
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: u32,

    /// Stems must be longer than this many characters.
    #[serde(default = "default_min_stem_length")]
    pub min_stem_length: usize,

    /// Extra words excluded from keyword candidacy (stemmed on load).
    #[serde(default)]
    pub extra_common_words: Vec<String>,
}

fn default_step() -> usize {
    10
}

fn default_frequency_threshold() -> u32 {
    8
}

fn default_min_stem_length() -> usize {
    4
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            frequency_threshold: default_frequency_threshold(),
            min_stem_length: default_min_stem_length(),
            extra_common_words: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.step == 0 {
            return Err("step must be > 0".to_string());
        }
        Ok(())
    }
}

/// Force layout settings.
///
/// Strength values follow the group policy: timeline nodes (segments and
/// anchors) repel harder and chain tightly, keywords cluster loosely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Render surface width; the centering force targets width / 2.
    #[serde(default = "default_width")]
    pub width: f64,

    /// Render surface height; the centering force targets height / 2.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Rest length of every link spring.
    #[serde(default = "default_link_distance")]
    pub link_distance: f64,

    /// Spring strength between two timeline nodes.
    #[serde(default = "default_timeline_link_strength")]
    pub timeline_link_strength: f64,

    /// Spring strength between two keyword nodes.
    #[serde(default = "default_keyword_link_strength")]
    pub keyword_link_strength: f64,

    /// Cross-group springs use max(weight) / this divisor.
    #[serde(default = "default_cross_link_divisor")]
    pub cross_link_divisor: f64,

    /// Charge of timeline nodes (negative repels).
    #[serde(default = "default_timeline_charge")]
    pub timeline_charge: f64,

    /// Charge of keyword nodes (negative repels).
    #[serde(default = "default_keyword_charge")]
    pub keyword_charge: f64,

    /// Energy below which the simulation stops ticking.
    #[serde(default = "default_alpha_min")]
    pub alpha_min: f64,

    /// Per-tick decay factor of energy towards its target.
    #[serde(default = "default_alpha_decay")]
    pub alpha_decay: f64,

    /// Energy target held while a node is dragged.
    #[serde(default = "default_drag_alpha_target")]
    pub drag_alpha_target: f64,

    /// Fraction of velocity lost per tick.
    #[serde(default = "default_velocity_decay")]
    pub velocity_decay: f64,

    /// Seed for particle placement and jiggle; None seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_width() -> f64 {
    960.0
}
fn default_height() -> f64 {
    600.0
}
fn default_link_distance() -> f64 {
    30.0
}
fn default_timeline_link_strength() -> f64 {
    2.0
}
fn default_keyword_link_strength() -> f64 {
    1.0 / 100.0
}
fn default_cross_link_divisor() -> f64 {
    200.0
}
fn default_timeline_charge() -> f64 {
    -80.0
}
fn default_keyword_charge() -> f64 {
    -20.0
}
fn default_alpha_min() -> f64 {
    0.001
}
fn default_alpha_decay() -> f64 {
    1.0 - default_alpha_min().powf(1.0 / 300.0)
}
fn default_drag_alpha_target() -> f64 {
    0.3
}
fn default_velocity_decay() -> f64 {
    0.4
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            link_distance: default_link_distance(),
            timeline_link_strength: default_timeline_link_strength(),
            keyword_link_strength: default_keyword_link_strength(),
            cross_link_divisor: default_cross_link_divisor(),
            timeline_charge: default_timeline_charge(),
            keyword_charge: default_keyword_charge(),
            alpha_min: default_alpha_min(),
            alpha_decay: default_alpha_decay(),
            drag_alpha_target: default_drag_alpha_target(),
            velocity_decay: default_velocity_decay(),
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "surface must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if !(0.0..1.0).contains(&self.alpha_decay) {
            return Err(format!("alpha_decay must be 0.0-1.0, got {}", self.alpha_decay));
        }
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(format!(
                "velocity_decay must be 0.0-1.0, got {}",
                self.velocity_decay
            ));
        }
        if self.cross_link_divisor <= 0.0 {
            return Err("cross_link_divisor must be > 0".to_string());
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return Err(format!("alpha_min must be in (0, 1), got {}", self.alpha_min));
        }
        if !(self.drag_alpha_target > 0.0 && self.drag_alpha_target <= 1.0) {
            return Err(format!(
                "drag_alpha_target must be in (0, 1], got {}",
                self.drag_alpha_target
            ));
        }
        Ok(())
    }

    /// Point the centering force pulls the centroid towards.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Where transcripts come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the transcript service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory of `<video-id>.json` files used instead of the service
    #[serde(default)]
    pub transcript_dir: Option<String>,
}

fn default_endpoint() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            transcript_dir: None,
        }
    }
}

/// Playback clock and tick loop cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// How often the clock is polled for recomputation (ms)
    #[serde(default = "default_clock_poll_ms")]
    pub clock_poll_ms: u64,

    /// Interval between simulation ticks (ms)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Playback speed multiplier of the simulated clock
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_clock_poll_ms() -> u64 {
    1000
}

fn default_tick_interval_ms() -> u64 {
    16
}

fn default_rate() -> f64 {
    1.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            clock_poll_ms: default_clock_poll_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            rate: default_rate(),
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.clock_poll_ms == 0 || self.tick_interval_ms == 0 {
            return Err("clock_poll_ms and tick_interval_ms must be > 0".to_string());
        }
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(format!("rate must be > 0, got {}", self.rate));
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            layout: LayoutConfig::default(),
            source: SourceConfig::default(),
            playback: PlaybackConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/transcript-graph/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (TGRAPH_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TranscriptError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| TranscriptError::Config(e.to_string()))?
            .set_default("analysis.step", default_step() as i64)
            .map_err(|e| TranscriptError::Config(e.to_string()))?
            .set_default(
                "analysis.frequency_threshold",
                i64::from(default_frequency_threshold()),
            )
            .map_err(|e| TranscriptError::Config(e.to_string()))?
            .set_default("source.endpoint", default_endpoint())
            .map_err(|e| TranscriptError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: TGRAPH_LOG_LEVEL, TGRAPH_ANALYSIS__STEP, TGRAPH_SOURCE__ENDPOINT
        builder = builder.add_source(
            Environment::with_prefix("TGRAPH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| TranscriptError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| TranscriptError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), TranscriptError> {
        self.analysis.validate().map_err(TranscriptError::Config)?;
        self.layout.validate().map_err(TranscriptError::Config)?;
        self.playback.validate().map_err(TranscriptError::Config)?;
        Ok(())
    }
}
