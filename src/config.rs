use crate::error::Result;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Used when the match does not announce a radius (viewer)
    #[serde(default = "default_radius")]
    pub default_radius: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Overrides the seed sent by the game
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_explore")]
    pub explore: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_turn_log: bool,
    #[serde(default = "default_turn_log_path")]
    pub turn_log_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_grid_width")]
    pub grid_width: i32,
    #[serde(default = "default_grid_height")]
    pub grid_height: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

// Default values
fn default_epsilon() -> f64 { crate::visibility::DEFAULT_EPSILON }
fn default_radius() -> i32 { 7 }
fn default_explore() -> bool { true }
fn default_turn_log_path() -> String { "turn_log.json".to_string() }
fn default_window_title() -> String { "gemscout - visibility viewer".to_string() }
fn default_grid_width() -> i32 { 24 }
fn default_grid_height() -> i32 { 18 }
fn default_cell_size() -> f32 { 30.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_snapshot_path() -> String { "map_snapshot.json".to_string() }

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            default_radius: default_radius(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            seed: None,
            explore: default_explore(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_turn_log: false,
            turn_log_path: default_turn_log_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            grid_width: default_grid_width(),
            grid_height: default_grid_height(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            bot: BotConfig::default(),
            logging: LoggingConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        if !Path::new(CONFIG_PATH).exists() {
            info!("No {} found, using default configuration", CONFIG_PATH);
            return Config::default();
        }

        match Self::from_path(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}", CONFIG_PATH, e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
