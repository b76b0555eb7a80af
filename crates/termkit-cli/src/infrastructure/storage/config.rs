//! TOML-based configuration persistence.
//!
//! `AppConfig` lives in `config.toml` inside the platform config directory:
//! - Linux:    `$XDG_CONFIG_HOME/termkit` or `~/.config/termkit`
//! - macOS:    `~/Library/Application Support/termkit`
//! - Windows:  `%APPDATA%\termkit`
//!
//! ```toml
//! [console]
//! color = true
//! log_level = "info"
//!
//! [lock]
//! directory = "/tmp/termkit/locks"
//! window_secs = 300
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing file, a missing
//! section or a missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::application::commands::LockSettings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// `config init` refused to overwrite an existing file.
    #[error("config file {0} already exists")]
    AlreadyExists(PathBuf),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub lock: LockConfig,
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Emit ANSI colors when stdout is a terminal.
    #[serde(default = "default_true")]
    pub color: bool,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Lock marker settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockConfig {
    #[serde(default = "default_lock_directory")]
    pub directory: PathBuf,
    /// Markers older than this many seconds are expired.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl LockConfig {
    pub fn settings(&self) -> LockSettings {
        LockSettings {
            dir: self.directory.clone(),
            window: Duration::from_secs(self.window_secs),
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_lock_directory() -> PathBuf {
    std::env::temp_dir().join("termkit").join("locks")
}
fn default_window_secs() -> u64 {
    300
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            directory: default_lock_directory(),
            window_secs: default_window_secs(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            debug!(path = %path.display(), "loaded config");
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = render_config(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes the default config to `path` unless a file is already there.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] when `path` exists and `force` is
/// false, otherwise as [`save_config_to`].
pub fn init_config_at(path: &Path, force: bool) -> Result<AppConfig, ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let config = AppConfig::default();
    save_config_to(path, &config)?;
    Ok(config)
}

/// Pretty TOML text for `config`.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Resolves the platform config directory including the `termkit` component.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("termkit"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("termkit"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("termkit"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_app_config_default_values() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert!(cfg.console.color);
        assert_eq!(cfg.console.log_level, "info");
        assert_eq!(cfg.lock.window_secs, 300);
        assert!(cfg.lock.directory.ends_with("termkit/locks"));
    }

    #[test]
    fn test_lock_config_settings_converts_window() {
        let cfg = LockConfig {
            directory: PathBuf::from("/var/lock/termkit"),
            window_secs: 90,
        };
        let settings = cfg.settings();
        assert_eq!(settings.dir, PathBuf::from("/var/lock/termkit"));
        assert_eq!(settings.window, Duration::from_secs(90));
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_section_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[lock]
window_secs = 60
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.lock.window_secs, 60);
        assert_eq!(cfg.lock.directory, default_lock_directory());
        assert!(cfg.console.color);
    }

    #[test]
    fn test_render_config_round_trips() {
        let mut cfg = AppConfig::default();
        cfg.console.color = false;
        cfg.lock.directory = PathBuf::from("/srv/locks");

        let text = render_config(&cfg).unwrap();
        let restored: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(restored, cfg);
        assert!(text.contains("[console]"));
        assert!(text.contains("[lock]"));
    }

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let err = load_config_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_round_trip_creates_parent_dirs() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.console.log_level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_init_config_at_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[console]\ncolor = false\n").unwrap();

        let err = init_config_at(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));

        init_config_at(&path, true).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }
}
