use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::animation::AnimationOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub frame: FrameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Default animation parameters, overridable per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Easing curve name (e.g., "linear", "easeInOutCubic")
    #[serde(default = "default_easing")]
    pub easing: String,
    /// Starting value
    #[serde(default)]
    pub from: f64,
    /// Ending value
    #[serde(default = "default_to")]
    pub to: f64,
    /// Duration of one pass in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Restart after every pass instead of finishing
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Travel from `to` back to `from`
    #[serde(default)]
    pub reverse: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            easing: default_easing(),
            from: 0.0,
            to: default_to(),
            duration_ms: default_duration_ms(),
            looping: false,
            reverse: false,
        }
    }
}

impl AnimationConfig {
    /// Options carrying these parameters and no callbacks, starting immediately
    pub fn to_options(&self) -> AnimationOptions {
        AnimationOptions::default()
            .range(self.from, self.to)
            .duration_ms(self.duration_ms)
            .looping(self.looping)
            .reverse(self.reverse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Target frames per second for the frame driver
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl FrameConfig {
    /// Interval between frames, never shorter than 1ms
    pub fn frame_interval(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.fps as u64).max(1))
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_easing() -> String {
    "linear".to_string()
}

fn default_to() -> f64 {
    1.0
}

fn default_duration_ms() -> f64 {
    300.0
}

fn default_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults if absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render as TOML, the same format `load` reads
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Write to `path`, creating parent directories.
    ///
    /// An existing file is left alone unless `overwrite` is set; returns
    /// whether the file was written.
    pub fn write_to(&self, path: &std::path::Path, overwrite: bool) -> crate::Result<bool> {
        if path.exists() && !overwrite {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;

        Ok(true)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/easer/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("easer")
            .join("config.toml")
    }
}
