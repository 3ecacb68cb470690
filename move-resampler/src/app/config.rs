//! Configuration Management

use crate::filter::one_euro::{FilterParam, DEFAULT_FILTER_PARAM, STARTUP_FILTER_PARAM};
use crate::resample::{MoveResampler, DEFAULT_MAX_EVENT_INTERVAL_US, STARTUP_DURATION_US};
use crate::time::vsync::MAX_REFRESH_HZ;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resampler and filter tuning
    pub resampler: ResamplerConfig,
    /// Move routing switches
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Offline replay settings
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Resampler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResamplerConfig {
    /// Retention window for buffered events (µs)
    pub max_event_interval_us: i64,
    /// Startup ramp length (µs, 0 = disabled)
    pub startup_duration_us: i64,
    /// Re-initialize the filters after a query gap longer than this (µs).
    /// Unset means only non-increasing query times re-initialize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_gap_us: Option<i64>,
    /// Filter tuning at the very start of a gesture
    pub startup_filter: FilterParam,
    /// Steady-state filter tuning
    pub normal_filter: FilterParam,
}

/// Move routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Resample touchscreen move events on vsync
    pub enable_move_resample: bool,
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Simulated display refresh rate (Hz)
    pub refresh_hz: f64,
    /// Keep resampling this long after the last sample (µs)
    pub tail_us: i64,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            max_event_interval_us: DEFAULT_MAX_EVENT_INTERVAL_US,
            startup_duration_us: STARTUP_DURATION_US,
            reset_gap_us: None,
            startup_filter: STARTUP_FILTER_PARAM,
            normal_filter: DEFAULT_FILTER_PARAM,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enable_move_resample: true,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 120.0,
            tail_us: 50_000,
        }
    }
}

impl ResamplerConfig {
    /// Build a resampler with this tuning
    pub fn build(&self) -> MoveResampler {
        MoveResampler::new(
            self.max_event_interval_us,
            self.startup_duration_us,
            self.startup_filter,
            self.normal_filter,
        )
        .with_reset_gap(self.reset_gap_us)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let resampler = &self.resampler;
        if resampler.max_event_interval_us <= 0 {
            return Err(crate::Error::Config(format!(
                "max_event_interval_us must be > 0, got {}",
                resampler.max_event_interval_us
            )));
        }
        if resampler.startup_duration_us < 0 {
            return Err(crate::Error::Config(format!(
                "startup_duration_us must be >= 0, got {}",
                resampler.startup_duration_us
            )));
        }
        if let Some(gap) = resampler.reset_gap_us {
            if gap <= 0 {
                return Err(crate::Error::Config(format!(
                    "reset_gap_us must be > 0 when set, got {}",
                    gap
                )));
            }
        }
        if !resampler.startup_filter.is_valid() {
            return Err(crate::Error::Config(format!(
                "startup_filter values must be finite and > 0, got {:?}",
                resampler.startup_filter
            )));
        }
        if !resampler.normal_filter.is_valid() {
            return Err(crate::Error::Config(format!(
                "normal_filter values must be finite and > 0, got {:?}",
                resampler.normal_filter
            )));
        }
        let refresh_hz = self.replay.refresh_hz;
        if !refresh_hz.is_finite() || refresh_hz <= 0.0 || refresh_hz > MAX_REFRESH_HZ {
            return Err(crate::Error::Config(format!(
                "refresh_hz must be in (0, {}], got {}",
                MAX_REFRESH_HZ, refresh_hz
            )));
        }
        if self.replay.tail_us < 0 {
            return Err(crate::Error::Config(format!(
                "tail_us must be >= 0, got {}",
                self.replay.tail_us
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".move_resampler").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.resampler.max_event_interval_us, 60_000);
        assert_eq!(config.resampler.startup_duration_us, 120_000);
        assert_eq!(config.resampler.normal_filter, DEFAULT_FILTER_PARAM);
        assert_eq!(config.resampler.startup_filter, STARTUP_FILTER_PARAM);
        assert!(config.resampler.reset_gap_us.is_none());
        assert!(config.routing.enable_move_resample);
        assert_eq!(config.replay.refresh_hz, 120.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[resampler]"));
        assert!(toml.contains("[resampler.normal_filter]"));
        assert!(toml.contains("[routing]"));
        assert!(toml.contains("[replay]"));
        assert!(!toml.contains("reset_gap_us"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let mut original = Config::default();
        original.resampler.reset_gap_us = Some(250_000);
        let toml_str = original.to_toml().unwrap();
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(deserialized.resampler.reset_gap_us, Some(250_000));
        assert_eq!(deserialized.resampler.normal_filter, original.resampler.normal_filter);
        assert_eq!(deserialized.replay.tail_us, original.replay.tail_us);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut original = Config::default();
        original.resampler.max_event_interval_us = 80_000;
        original.resampler.normal_filter.beta = 0.01;
        original.replay.refresh_hz = 90.0;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.resampler.max_event_interval_us, 80_000);
        assert_eq!(loaded.resampler.normal_filter.beta, 0.01);
        assert_eq!(loaded.replay.refresh_hz, 90.0);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("path").join("config.toml");

        Config::default().save(&nested_path).expect("Failed to save config");
        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = Config::load(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_parsing() {
        let result: Result<Config, _> = toml::from_str("this is not valid toml {{{}}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_interval_zero() {
        let mut config = Config::default();
        config.resampler.max_event_interval_us = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_startup() {
        let mut config = Config::default();
        config.resampler.startup_duration_us = -1;
        assert!(config.validate().is_err());

        // Zero disables the ramp and is valid
        config.resampler.startup_duration_us = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reset_gap() {
        let mut config = Config::default();
        config.resampler.reset_gap_us = Some(0);
        assert!(config.validate().is_err());
        config.resampler.reset_gap_us = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_filter_params() {
        let mut config = Config::default();
        config.resampler.normal_filter.min_cutoff = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.resampler.startup_filter.d_cutoff = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_refresh_rate() {
        let mut config = Config::default();
        config.replay.refresh_hz = 0.0;
        assert!(config.validate().is_err());
        config.replay.refresh_hz = 1_000.0;
        assert!(config.validate().is_ok());
        config.replay.refresh_hz = 1_000.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_tail() {
        let mut config = Config::default();
        config.replay.tail_us = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        std::fs::write(&config_path, r#"
[resampler]
max_event_interval_us = -10
startup_duration_us = 120000

[resampler.startup_filter]
min_cutoff = 0.1
beta = 0.005
d_cutoff = 1.0

[resampler.normal_filter]
min_cutoff = 0.8
beta = 0.005
d_cutoff = 1.0
"#).expect("Failed to write config");
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_without_optional_sections_deserializes() {
        let minimal = r#"
[resampler]
max_event_interval_us = 40000
startup_duration_us = 0

[resampler.startup_filter]
min_cutoff = 0.1
beta = 0.005
d_cutoff = 1.0

[resampler.normal_filter]
min_cutoff = 1.2
beta = 0.007
d_cutoff = 1.0
"#;

        let config: Config = toml::from_str(minimal)
            .expect("Config without [routing]/[replay] should deserialize");

        assert_eq!(config.resampler.max_event_interval_us, 40_000);
        assert_eq!(config.resampler.normal_filter.min_cutoff, 1.2);
        assert!(config.resampler.reset_gap_us.is_none());
        assert!(config.routing.enable_move_resample);
        assert_eq!(config.replay.refresh_hz, 120.0);
        assert_eq!(config.replay.tail_us, 50_000);
    }

    #[test]
    fn test_build_resampler() {
        let mut config = Config::default();
        config.resampler.max_event_interval_us = 30_000;
        config.resampler.startup_duration_us = 0;

        let mut resampler = config.resampler.build();
        assert_eq!(resampler.max_event_interval_us(), 30_000);
        resampler.push_event(0, 1, 1);
        assert!(!resampler.in_startup());
    }
}
