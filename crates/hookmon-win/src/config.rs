//! TOML-based configuration for the hookmon monitor.
//!
//! Reads and writes [`MonitorConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\hookmon\config.toml`
//! - Linux:    `~/.config/hookmon/config.toml`
//! - macOS:    `~/Library/Application Support/hookmon/config.toml`
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so the monitor
//! works on first run (before a config file exists) and when upgrading from
//! an older file that is missing newer fields.
//!
//! Example:
//!
//! ```toml
//! [monitor]
//! log_level = "info"
//! raise_mouse_moves = false
//!
//! [hooks]
//! keyboard = true
//! mouse = true
//!
//! [double_click]
//! interval_ms = 500
//! slop_px = 4
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level monitor configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub monitor: GeneralConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub double_click: DoubleClickConfig,
}

/// General monitor behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether raw cursor-move events are raised to subscribers. High-rate;
    /// disable for quieter logs.
    #[serde(default = "default_true")]
    pub raise_mouse_moves: bool,
}

/// Which hooks the source installs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HooksConfig {
    #[serde(default = "default_true")]
    pub keyboard: bool,
    #[serde(default = "default_true")]
    pub mouse: bool,
}

/// Double-click synthesis parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoubleClickConfig {
    /// Maximum interval between presses, in milliseconds.
    #[serde(default = "default_double_click_interval")]
    pub interval_ms: u32,
    /// Slop half-width in pixels around the first press.
    #[serde(default = "default_double_click_slop")]
    pub slop_px: i32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_double_click_interval() -> u32 {
    crate::dispatch::click::DEFAULT_INTERVAL_MS
}
fn default_double_click_slop() -> i32 {
    crate::dispatch::click::DEFAULT_SLOP_PX
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            raise_mouse_moves: default_true(),
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            keyboard: default_true(),
            mouse: default_true(),
        }
    }
}

impl Default for DoubleClickConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_double_click_interval(),
            slop_px: default_double_click_slop(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads [`MonitorConfig`] from `path`, or from the platform default path
/// when `path` is `None`. A missing file yields `MonitorConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<PathBuf>) -> Result<MonitorConfig, ConfigError> {
    let path = match path {
        Some(path) => path,
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MonitorConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to the platform default path, creating the directory
/// if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io { path, source })?;
    Ok(())
}

/// Resolves the platform config base directory including the `hookmon`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("hookmon"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("hookmon"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library/Application Support/hookmon"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_raises_everything() {
        let cfg = MonitorConfig::default();

        assert!(cfg.hooks.keyboard);
        assert!(cfg.hooks.mouse);
        assert!(cfg.monitor.raise_mouse_moves);
        assert_eq!(cfg.monitor.log_level, "info");
    }

    #[test]
    fn test_default_double_click_matches_os_defaults() {
        let cfg = MonitorConfig::default();

        assert_eq!(cfg.double_click.interval_ms, 500);
        assert_eq!(cfg.double_click.slop_px, 4);
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let cfg: MonitorConfig = toml::from_str("").expect("empty config must parse");

        assert_eq!(cfg, MonitorConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_missing_fields() {
        let cfg: MonitorConfig = toml::from_str(
            r#"
            [monitor]
            raise_mouse_moves = false

            [double_click]
            interval_ms = 350
            "#,
        )
        .expect("partial config must parse");

        assert!(!cfg.monitor.raise_mouse_moves);
        assert_eq!(cfg.monitor.log_level, "info");
        assert_eq!(cfg.double_click.interval_ms, 350);
        assert_eq!(cfg.double_click.slop_px, 4);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut original = MonitorConfig::default();
        original.hooks.mouse = false;
        original.monitor.log_level = "debug".to_string();

        let text = toml::to_string_pretty(&original).expect("serialize must succeed");
        let restored: MonitorConfig = toml::from_str(&text).expect("parse must succeed");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = toml::from_str::<MonitorConfig>("monitor = \"not a table\"");

        assert!(result.is_err());
    }
}
