//! Engine configuration
//!
//! Loaded once at startup: JSON file first, then environment overrides, then
//! validation. Any failure here is fatal to the binary.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::MILLISECONDS_PER_SECOND;
use crate::error::ConfigError;

/// Environment variables overriding file values share this prefix
pub const ENV_PREFIX: &str = "GR__CORE__GAME__GAME_ENGINE__";

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config/engine.json";

/// Tunables read by the game engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target ticks per second
    pub frame_rate: u32,
    pub spacefield_width: u32,
    pub spacefield_height: u32,
    /// Chance per tick that a new asteroid spawns
    pub asteroid_probability: f64,
    /// 1.0 is perfectly elastic, 0.0 perfectly inelastic along the normal
    pub coefficient_restitution: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            spacefield_width: 164,
            spacefield_height: 50,
            asteroid_probability: 0.02,
            coefficient_restitution: 0.8,
        }
    }
}

impl EngineConfig {
    /// Milliseconds allotted to one tick
    pub fn ms_per_frame(&self) -> u64 {
        MILLISECONDS_PER_SECOND / u64::from(self.frame_rate.max(1))
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.ms_per_frame())
    }

    /// File, then environment, then validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. A missing file yields the defaults; keys
    /// absent from the file keep their default values.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Override fields from `lookup`, keyed by the full prefixed variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_override(&lookup, "FRAME_RATE")? {
            self.frame_rate = v;
        }
        if let Some(v) = parse_override(&lookup, "SPACEFIELD_WIDTH")? {
            self.spacefield_width = v;
        }
        if let Some(v) = parse_override(&lookup, "SPACEFIELD_HEIGHT")? {
            self.spacefield_height = v;
        }
        if let Some(v) = parse_override(&lookup, "ASTEROID_PROBABILITY")? {
            self.asteroid_probability = v;
        }
        if let Some(v) = parse_override(&lookup, "COEFFICIENT_RESTITUTION")? {
            self.coefficient_restitution = v;
        }
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.frame_rate) {
            return Err(ConfigError::OutOfRange {
                name: "frame_rate",
                value: f64::from(self.frame_rate),
                expected: "1..=1000",
            });
        }
        for (name, value) in [
            ("spacefield_width", self.spacefield_width),
            ("spacefield_height", self.spacefield_height),
        ] {
            if value == 0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: f64::from(value),
                    expected: ">= 1",
                });
            }
        }
        for (name, value) in [
            ("asteroid_probability", self.asteroid_probability),
            ("coefficient_restitution", self.coefficient_restitution),
        ] {
            // NaN fails `contains` as well
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected: "[0, 1]",
                });
            }
        }
        Ok(())
    }
}

fn parse_override<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{ENV_PREFIX}{name}");
    let Some(raw) = lookup(&key) else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(value) => {
            log::info!("Config override from {}", key);
            Ok(Some(value))
        }
        Err(_) => Err(ConfigError::InvalidEnv { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ms_per_frame(), 33);
    }

    #[test]
    fn test_ms_per_frame() {
        let config = EngineConfig {
            frame_rate: 50,
            ..Default::default()
        };
        assert_eq!(config.ms_per_frame(), 20);
        assert_eq!(config.frame_budget(), Duration::from_millis(20));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let config = EngineConfig::load_file(dir.join("nope.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let path = dir.join("engine.json");
        fs::write(&path, r#"{"frame_rate": 60, "spacefield_width": 80}"#).unwrap();

        let config = EngineConfig::load_file(&path).unwrap();
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.spacefield_width, 80);
        assert_eq!(config.spacefield_height, EngineConfig::default().spacefield_height);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let path = dir.join("engine.json");
        fs::write(&path, "frame_rate = 60").unwrap();

        let err = EngineConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = EngineConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("FRAME_RATE", "10"),
                ("ASTEROID_PROBABILITY", " 0.5 "),
            ]))
            .unwrap();

        assert_eq!(config.frame_rate, 10);
        assert_eq!(config.asteroid_probability, 0.5);
        assert_eq!(config.spacefield_width, 164);
    }

    #[test]
    fn test_unparseable_override_is_rejected() {
        let mut config = EngineConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("SPACEFIELD_HEIGHT", "tall")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidEnv { key, value } => {
                assert_eq!(key, format!("{ENV_PREFIX}SPACEFIELD_HEIGHT"));
                assert_eq!(value, "tall");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_ranges() {
        let bad = [
            EngineConfig {
                frame_rate: 0,
                ..Default::default()
            },
            EngineConfig {
                frame_rate: 1001,
                ..Default::default()
            },
            EngineConfig {
                spacefield_width: 0,
                ..Default::default()
            },
            EngineConfig {
                asteroid_probability: 1.5,
                ..Default::default()
            },
            EngineConfig {
                coefficient_restitution: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(ConfigError::OutOfRange { .. })),
                "{config:?} should be rejected"
            );
        }
    }
}
