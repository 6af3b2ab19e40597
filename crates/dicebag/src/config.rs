//! Configuration for value generation defaults.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Defaults applied when a generator is called without explicit bounds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RandomConfig {
    /// Locale used by name and postcode generators
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Earliest date produced by `date` when no start is given (YYYY-MM-DD)
    #[serde(default = "default_date_start")]
    pub date_start: String,

    /// Earliest clock time produced by `time` (HH:MM)
    #[serde(default = "default_time_start")]
    pub time_start: String,

    /// Latest clock time produced by `time` (HH:MM, inclusive of its last second)
    #[serde(default = "default_time_end")]
    pub time_end: String,
}

fn default_locale() -> String {
    "pt_BR".to_string()
}

fn default_date_start() -> String {
    "2000-01-01".to_string()
}

fn default_time_start() -> String {
    "00:00".to_string()
}

fn default_time_end() -> String {
    "23:59".to_string()
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            date_start: default_date_start(),
            time_start: default_time_start(),
            time_end: default_time_end(),
        }
    }
}

impl RandomConfig {
    /// Load and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML content.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RandomConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every date and time field parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if parse_date(&self.date_start).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "date_start",
                value: self.date_start.clone(),
            });
        }
        if parse_clock(&self.time_start, false).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "time_start",
                value: self.time_start.clone(),
            });
        }
        if parse_clock(&self.time_end, true).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "time_end",
                value: self.time_end.clone(),
            });
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parse an `HH:MM` or `HH:MM:SS` clock time.
///
/// An `HH:MM` end bound covers its whole minute, so it resolves to `HH:MM:59`.
pub fn parse_clock(value: &str, end_of_minute: bool) -> Option<NaiveTime> {
    let value = value.trim();
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M:%S") {
        return Some(time);
    }
    let time = NaiveTime::parse_from_str(value, "%H:%M").ok()?;
    if end_of_minute {
        time.with_second(59)
    } else {
        Some(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RandomConfig::default();
        assert_eq!(config.locale, "pt_BR");
        assert_eq!(config.date_start, "2000-01-01");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = RandomConfig::from_yaml_str("locale: en_US\n").unwrap();
        assert_eq!(config.locale, "en_US");
        assert_eq!(config.time_end, "23:59");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = RandomConfig::from_yaml_str("date_start: yesterday\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "date_start",
                ..
            }
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "locale: en_US").unwrap();
        writeln!(file, "time_start: \"08:00\"").unwrap();
        writeln!(file, "time_end: \"18:00\"").unwrap();

        let config = RandomConfig::load(file.path()).unwrap();
        assert_eq!(config.locale, "en_US");
        assert_eq!(config.time_start, "08:00");
    }

    #[test]
    fn test_load_missing_file() {
        let err = RandomConfig::load(Path::new("/nonexistent/dicebag.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(
            parse_clock("23:59", true),
            NaiveTime::from_hms_opt(23, 59, 59)
        );
        assert_eq!(parse_clock("08:30", false), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(
            parse_clock("08:30:15", true),
            NaiveTime::from_hms_opt(8, 30, 15)
        );
        assert!(parse_clock("25:00", false).is_none());
    }
}
