use crate::error::MazeError;
use crate::pathfinding::GScoring;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct MazeConfig {
    /// Fixed seed for reproducible mazes; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub scoring: GScoring,
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_steps_per_frame")]
    pub generation_steps_per_frame: u32,
    #[serde(default = "default_steps_per_frame")]
    pub search_steps_per_frame: u32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_search_sets")]
    pub show_search_sets: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_step_log")]
    pub enable_step_log: bool,
    #[serde(default = "default_step_log_path")]
    pub step_log_path: String,
}

// Default values
fn default_steps_per_frame() -> u32 { 1 }
fn default_window_title() -> String { "Maze A* - Generation and Search".to_string() }
fn default_cell_size() -> f32 { 8.0 }
fn default_bg_r() -> u8 { 122 }
fn default_bg_g() -> u8 { 119 }
fn default_bg_b() -> u8 { 119 }
fn default_show_search_sets() -> bool { true }
fn default_enable_step_log() -> bool { true }
fn default_step_log_path() -> String { "step_log.json".to_string() }

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            generation_steps_per_frame: default_steps_per_frame(),
            search_steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_search_sets: default_show_search_sets(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_step_log: default_enable_step_log(),
            step_log_path: default_step_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }

    /// Parse configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self, MazeError> {
        Ok(toml::from_str(contents)?)
    }
}
