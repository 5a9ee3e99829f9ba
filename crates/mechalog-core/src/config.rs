//! Runtime configuration
//!
//! Engine thresholds loaded from a small `key=value` text file. A missing
//! file is created with the defaults so the operator can edit it later.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default engine-on temperature threshold (°C)
pub const DEFAULT_ENGINE_ON_TEMPERATURE: f32 = 25.0;

/// Default engine-off temperature threshold (°C)
pub const DEFAULT_ENGINE_OFF_TEMPERATURE: f32 = 15.0;

/// Default humidity threshold (%)
pub const DEFAULT_HUMIDITY_THRESHOLD: u16 = 70;

/// Default configuration file name
pub const CONFIG_FILE: &str = "mechalog.conf";

/// Errors raised while reading or writing the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Engine thresholds in force for new readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ambient temperature above which the engine is started (°C)
    pub engine_on_temperature: f32,
    /// Ambient temperature below which the engine is stopped (°C)
    pub engine_off_temperature: f32,
    /// Ambient humidity threshold (%)
    pub humidity_threshold: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_on_temperature: DEFAULT_ENGINE_ON_TEMPERATURE,
            engine_off_temperature: DEFAULT_ENGINE_OFF_TEMPERATURE,
            humidity_threshold: DEFAULT_HUMIDITY_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse a configuration file.
    ///
    /// Blank lines and `#` comments are ignored; unknown keys are logged
    /// and skipped; keys absent from the file keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut config = Config::default();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Parse {
                line: line_no + 1,
                message: format!("expected 'key=value', got '{line}'"),
            })?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "engine_on_temperature" => {
                    config.engine_on_temperature = parse_value(key, value)?;
                }
                "engine_off_temperature" => {
                    config.engine_off_temperature = parse_value(key, value)?;
                }
                "humidity_threshold" => {
                    config.humidity_threshold = parse_value(key, value)?;
                }
                other => {
                    tracing::warn!("ignoring unknown configuration key '{other}'");
                }
            }
        }

        Ok(config)
    }

    /// Write this configuration to `path`, replacing any previous content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let mut file = fs::File::create(path)?;
        writeln!(file, "# mechalog engine thresholds")?;
        writeln!(file, "engine_on_temperature={:.2}", self.engine_on_temperature)?;
        writeln!(file, "engine_off_temperature={:.2}", self.engine_off_temperature)?;
        writeln!(file, "humidity_threshold={}", self.humidity_threshold)?;
        Ok(())
    }

    /// Load the configuration, creating the file with defaults when it
    /// does not exist yet.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::load(path)?;
            tracing::info!("configuration loaded from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            tracing::info!(
                "configuration file {} not found, created it with defaults",
                path.display()
            );
            Ok(config)
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine_on_temperature, 25.0);
        assert_eq!(config.engine_off_temperature, 15.0);
        assert_eq!(config.humidity_threshold, 70);
    }

    #[test]
    fn test_load_parses_values_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mechalog.conf");
        fs::write(
            &path,
            "# thresholds\nengine_on_temperature=30.50\n\nengine_off_temperature = 12\nhumidity_threshold=65\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.engine_on_temperature, 30.5);
        assert_eq!(config.engine_off_temperature, 12.0);
        assert_eq!(config.humidity_threshold, 65);
    }

    #[test]
    fn test_load_rejects_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mechalog.conf");
        fs::write(&path, "engine_on_temperature\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_rejects_bad_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mechalog.conf");
        fs::write(&path, "humidity_threshold=wet\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mechalog.conf");

        let created = Config::load_or_create(&path).unwrap();
        assert_eq!(created, Config::default());
        assert!(path.exists());

        // second call reads the file it just wrote
        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded, created);
    }
}
