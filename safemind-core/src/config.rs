//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/safemind/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/safemind/` (~/.config/safemind/)
//! - State/Logs: `$XDG_STATE_HOME/safemind/` (~/.local/state/safemind/)

use crate::analytics::WindowAnchor;
use crate::error::{Error, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard analytics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// N for a last-N-days window when none is given
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,

    /// Trailing days searched for the latest dominant category
    #[serde(default = "default_dominant_lookback_days")]
    pub dominant_lookback_days: u32,

    /// Fixed offset such as "+05:30"; the host zone is used when unset
    #[serde(default)]
    pub utc_offset: Option<String>,

    /// Where a last-N-days window ends
    #[serde(default)]
    pub last_week_anchor: WindowAnchor,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
            dominant_lookback_days: default_dominant_lookback_days(),
            utc_offset: None,
            last_week_anchor: WindowAnchor::default(),
        }
    }
}

/// Longest window, in days, accepted from configuration or the CLI.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

fn default_window_days() -> u32 {
    7
}

fn default_dominant_lookback_days() -> u32 {
    7
}

impl AnalyticsConfig {
    /// The configured fixed offset, or `None` for the host time zone.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset.as_deref().map(parse_utc_offset).transpose()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.default_window_days) {
            return Err(Error::Config(format!(
                "analytics.default_window_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.dominant_lookback_days) {
            return Err(Error::Config(format!(
                "analytics.dominant_lookback_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        self.fixed_offset()?;
        Ok(())
    }
}

/// Parse an offset like "+05:30", "-0800", "+02" or "Z".
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || Error::Config(format!("invalid analytics.utc_offset: {:?}", raw));
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.analytics.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/safemind/config.toml` (~/.config/safemind/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("safemind").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/safemind/` (~/.local/state/safemind/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("safemind")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/safemind/safemind.log` (~/.local/state/safemind/safemind.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("safemind.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// Called by the CLI before logging starts so every component resolves
    /// the same directories.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.default_window_days, 7);
        assert_eq!(config.analytics.dominant_lookback_days, 7);
        assert_eq!(config.analytics.last_week_anchor, WindowAnchor::Today);
        assert!(config.analytics.utc_offset.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
default_window_days = 14
dominant_lookback_days = 3
utc_offset = "+05:30"
last_week_anchor = "yesterday"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.analytics.default_window_days, 14);
        assert_eq!(config.analytics.dominant_lookback_days, 3);
        assert_eq!(config.analytics.last_week_anchor, WindowAnchor::Yesterday);
        assert_eq!(
            config.analytics.fixed_offset().unwrap(),
            FixedOffset::east_opt(5 * 3600 + 30 * 60)
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_utc_offset_forms() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("-08:00").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_utc_offset("+0930").unwrap().local_minus_utc(), 9 * 3600 + 1800);
        assert_eq!(parse_utc_offset("+02").unwrap().local_minus_utc(), 2 * 3600);
        assert!(parse_utc_offset("05:30").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("+05:75").is_err());
    }

    #[test]
    fn test_analytics_validation() {
        assert!(AnalyticsConfig::default().validate().is_ok());

        let config = AnalyticsConfig {
            default_window_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            dominant_lookback_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            default_window_days: MAX_WINDOW_DAYS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            dominant_lookback_days: u32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            default_window_days: MAX_WINDOW_DAYS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = AnalyticsConfig {
            utc_offset: Some("somewhere".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\ndefault_window_days = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
    }
}
