use crate::enums::{HorizontalAnchor, SpriteKey};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Highest accepted tick rate; keeps the fixed timestep well above zero
pub const MAX_TICK_HZ: f64 = 1000.0;

/// Default location of the optional config file
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.json";

/// Top-level game configuration matching the JSON format
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub sprites: SpriteConfig,
    /// Fixed tick rate of the physics/animation loop
    pub tick_hz: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            player: PlayerConfig::default(),
            sprites: SpriteConfig::default(),
            tick_hz: 60.0,
        }
    }
}

/// Window (drawing surface) settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub clear_color: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sidescroll Runner".to_string(),
            width: 1280.0,
            height: 720.0,
            clear_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Player tuning - all velocities are in pixels per tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub standing_width: f32,
    pub standing_height: f32,
    pub sliding_width: f32,
    pub sliding_height: f32,
    /// Negative = up
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_jumps: u8,
    /// Distance between the sprite's bottom edge and the surface's bottom edge when grounded
    pub ground_margin: f32,
    /// Ticks per running-cycle frame
    pub frame_interval: u32,
    pub anchor: HorizontalAnchor,
    pub initial_x: f32,
    pub scroll_speed: f32,
    pub recenter_on_resize: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            standing_width: 400.0,
            standing_height: 400.0,
            sliding_width: 400.0,
            sliding_height: 400.0,
            jump_velocity: -12.0,
            gravity: 0.5,
            max_jumps: 2,
            ground_margin: 50.0,
            frame_interval: 10,
            anchor: HorizontalAnchor::Fixed,
            initial_x: 400.0,
            scroll_speed: 4.0,
            recenter_on_resize: true,
        }
    }
}

/// Image paths for each logical sprite, relative to the asset folder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub running: Vec<String>,
    pub sliding: String,
    pub jump_first: String,
    pub jump_second: String,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            running: vec![
                "character1.png".to_string(),
                "character2.png".to_string(),
                "character3.png".to_string(),
            ],
            sliding: "character4.png".to_string(),
            jump_first: "character5.png".to_string(),
            jump_second: "character6.png".to_string(),
        }
    }
}

impl SpriteConfig {
    /// Path for a logical sprite
    pub fn path(&self, key: SpriteKey) -> &str {
        match key {
            SpriteKey::Run1 => self.running.first().map_or("", String::as_str),
            SpriteKey::Run2 => self.running.get(1).map_or("", String::as_str),
            SpriteKey::Run3 => self.running.get(2).map_or("", String::as_str),
            SpriteKey::Slide => &self.sliding,
            SpriteKey::Jump1 => &self.jump_first,
            SpriteKey::Jump2 => &self.jump_second,
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config_from_file(path: &str) -> Result<GameConfig, ConfigLoadError> {
    if !Path::new(path).exists() {
        return Err(ConfigLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::IoError(path.to_string(), e.to_string()))?;

    let config: GameConfig = serde_json::from_str(&contents)
        .map_err(|e| ConfigLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Where the active configuration came from
#[derive(Resource, Clone, Debug, PartialEq)]
pub enum ConfigSource {
    File(String),
    Missing(String),
    Defaults { reason: String },
}

/// Load configuration, falling back to defaults when the file is missing or invalid.
///
/// Runs before the log subscriber exists, so the outcome is returned as a
/// [`ConfigSource`] for a startup system to report.
pub fn load_config_or_default(path: &str) -> (GameConfig, ConfigSource) {
    match load_config_from_file(path) {
        Ok(config) => (config, ConfigSource::File(path.to_string())),
        Err(ConfigLoadError::FileNotFound(_)) => {
            (GameConfig::default(), ConfigSource::Missing(path.to_string()))
        }
        Err(e) => (
            GameConfig::default(),
            ConfigSource::Defaults {
                reason: e.to_string(),
            },
        ),
    }
}

/// Startup system reporting the config outcome once logging is up
pub fn report_config_source(source: Res<ConfigSource>) {
    match source.as_ref() {
        ConfigSource::File(path) => info!("Loaded config from {}", path),
        ConfigSource::Missing(path) => info!("No config file at {}, using defaults", path),
        ConfigSource::Defaults { reason } => warn!("{}; using defaults", reason),
    }
}

/// Validate config values the state machine relies on
pub fn validate_config(config: &GameConfig) -> Result<(), ConfigLoadError> {
    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Window dimensions must be positive".to_string(),
        ));
    }

    let player = &config.player;
    if player.standing_width <= 0.0
        || player.standing_height <= 0.0
        || player.sliding_width <= 0.0
        || player.sliding_height <= 0.0
    {
        return Err(ConfigLoadError::ValidationError(
            "Player dimensions must be positive".to_string(),
        ));
    }

    if player.gravity < 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Gravity cannot be negative".to_string(),
        ));
    }

    if player.jump_velocity >= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Jump velocity must be negative (upward)".to_string(),
        ));
    }

    if player.max_jumps == 0 {
        return Err(ConfigLoadError::ValidationError(
            "max_jumps must be at least 1".to_string(),
        ));
    }

    if player.frame_interval == 0 {
        return Err(ConfigLoadError::ValidationError(
            "frame_interval must be at least 1".to_string(),
        ));
    }

    if config.sprites.running.len() != SpriteKey::RUNNING_CYCLE.len() {
        return Err(ConfigLoadError::ValidationError(format!(
            "Expected {} running sprites, found {}",
            SpriteKey::RUNNING_CYCLE.len(),
            config.sprites.running.len()
        )));
    }

    if !config.tick_hz.is_finite() || config.tick_hz <= 0.0 || config.tick_hz > MAX_TICK_HZ {
        return Err(ConfigLoadError::ValidationError(format!(
            "tick_hz must be in (0, {}]",
            MAX_TICK_HZ
        )));
    }

    Ok(())
}

/// Config loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigLoadError::IoError(path, err) => {
                write!(f, "IO error reading config file {}: {}", path, err)
            }
            ConfigLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse config file {}: {}", path, err)
            }
            ConfigLoadError::ValidationError(msg) => write!(f, "Config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}
