//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Scheduler thresholds (brain burner cap, autopilot window, inactivity)
//! - Local profile identity
//! - Analytics window and demo data settings
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::stats::MAX_WINDOW_DAYS;
use crate::scheduler::{
    SchedulerConfig, AUTOPILOT_WINDOW_END, AUTOPILOT_WINDOW_START, BRAIN_BURNER_DAILY_CAP,
    INACTIVITY_THRESHOLD_HOURS,
};

/// Scheduler thresholds as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSection {
    #[serde(default = "default_cap")]
    pub brain_burner_daily_cap: i32,
    #[serde(default = "default_window_start")]
    pub autopilot_window_start: i32,
    #[serde(default = "default_window_end")]
    pub autopilot_window_end: i32,
    #[serde(default = "default_inactivity_hours")]
    pub inactivity_threshold_hours: i64,
}

/// Local profile identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Identifier used for presence
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Days covered by trend, streak and chart views
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Show generated demo data when nothing has been recorded yet
    #[serde(default = "default_true")]
    pub use_mock_data: bool,
    /// Seed for demo energy readings
    #[serde(default = "default_mock_seed", with = "seed_repr")]
    pub mock_seed: u64,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerSection,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// TOML integers are signed 64-bit, so seeds above `i64::MAX` are written
/// as strings. Both forms are read back.
mod seed_repr {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(seed: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        match i64::try_from(*seed) {
            Ok(v) => serializer.serialize_i64(v),
            Err(_) => serializer.serialize_str(&seed.to_string()),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(v),
            Repr::Text(t) => t.parse().map_err(D::Error::custom),
        }
    }
}

fn default_cap() -> i32 {
    BRAIN_BURNER_DAILY_CAP
}
fn default_window_start() -> i32 {
    AUTOPILOT_WINDOW_START
}
fn default_window_end() -> i32 {
    AUTOPILOT_WINDOW_END
}
fn default_inactivity_hours() -> i64 {
    INACTIVITY_THRESHOLD_HOURS
}
fn default_user_id() -> String {
    "local".into()
}
fn default_window_days() -> u32 {
    30
}
fn default_true() -> bool {
    true
}
fn default_mock_seed() -> u64 {
    42
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            brain_burner_daily_cap: default_cap(),
            autopilot_window_start: default_window_start(),
            autopilot_window_end: default_window_end(),
            inactivity_threshold_hours: default_inactivity_hours(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            display_name: String::new(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            use_mock_data: true,
            mock_seed: default_mock_seed(),
        }
    }
}

impl SchedulerSection {
    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            brain_burner_daily_cap: self.brain_burner_daily_cap,
            autopilot_window_start: self.autopilot_window_start,
            autopilot_window_end: self.autopilot_window_end,
            inactivity_threshold: Duration::try_hours(self.inactivity_threshold_hours)
                .unwrap_or_else(|| Duration::hours(INACTIVITY_THRESHOLD_HOURS)),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |current, part| current.get(part))
    }

    /// Replace the leaf at `key`, parsing `value` according to the type of
    /// the value already there.
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut parent = root;
        if let Some(path) = parent_path {
            for part in path.split('.') {
                parent = parent.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<i64>()
                    .map(serde_json::Number::from)
                    .or_else(|_| value.parse::<u64>().map(serde_json::Number::from))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                serde_json::Value::Number(n)
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot replace a whole section".to_string()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Reject values that parse but cannot be used.
    fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.scheduler.inactivity_threshold_hours;
        if hours < 0 || Duration::try_hours(hours).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "scheduler.inactivity_threshold_hours".to_string(),
                message: format!("{hours} is not a usable number of hours"),
            });
        }
        if self.analytics.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "analytics.window_days".to_string(),
                message: format!("must be at most {MAX_WINDOW_DAYS}"),
            });
        }
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the key's type. The config is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        self.scheduler.to_scheduler_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[scheduler]\nbrain_burner_daily_cap = 5\n").unwrap();
        assert_eq!(parsed.scheduler.brain_burner_daily_cap, 5);
        assert_eq!(parsed.scheduler.autopilot_window_start, 15);
        assert_eq!(parsed.profile.user_id, "local");
        assert_eq!(parsed.analytics.window_days, 30);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scheduler.brain_burner_daily_cap").as_deref(), Some("3"));
        assert_eq!(cfg.get("analytics.use_mock_data").as_deref(), Some("true"));
        assert_eq!(cfg.get("profile.user_id").as_deref(), Some("local"));
        assert!(cfg.get("scheduler.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("scheduler.autopilot_window_start", "14").unwrap();
        cfg.set("analytics.use_mock_data", "false").unwrap();
        cfg.set("profile.display_name", "Rin").unwrap();
        assert_eq!(cfg.scheduler.autopilot_window_start, 14);
        assert!(!cfg.analytics.use_mock_data);
        assert_eq!(cfg.profile.display_name, "Rin");
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("scheduler.nonexistent", "1"),
            Err(crate::CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("analytics.use_mock_data", "maybe"),
            Err(crate::CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("scheduler", "1").is_err());
        // Negative value for an unsigned field fails at deserialization
        assert!(cfg.set("analytics.window_days", "-1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn scheduler_section_converts() {
        let mut cfg = Config::default();
        cfg.scheduler.inactivity_threshold_hours = 12;
        let sc = cfg.scheduler_config();
        assert_eq!(sc.inactivity_threshold, Duration::hours(12));
        assert_eq!(sc.brain_burner_daily_cap, 3);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        std::fs::write(&path, "scheduler = 7").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn set_rejects_unusable_inactivity_threshold() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("scheduler.inactivity_threshold_hours", "9223372036854775807"),
            Err(crate::CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("scheduler.inactivity_threshold_hours", "-5").is_err());
        assert!(cfg.set("analytics.window_days", "100000").is_err());
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.scheduler_config().inactivity_threshold, Duration::hours(24));
    }

    #[test]
    fn load_rejects_unusable_inactivity_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scheduler]\ninactivity_threshold_hours = 9223372036854775807\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(crate::CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn out_of_range_threshold_falls_back_to_default() {
        let section = SchedulerSection {
            inactivity_threshold_hours: i64::MAX,
            ..SchedulerSection::default()
        };
        assert_eq!(section.to_scheduler_config().inactivity_threshold, Duration::hours(24));
    }

    #[test]
    fn mock_seed_accepts_full_u64_range() {
        let mut cfg = Config::default();
        cfg.set("analytics.mock_seed", "18446744073709551615").unwrap();
        assert_eq!(cfg.analytics.mock_seed, u64::MAX);
        assert_eq!(cfg.get("analytics.mock_seed").as_deref(), Some("18446744073709551615"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().analytics.mock_seed, u64::MAX);

        cfg.set("analytics.mock_seed", "7").unwrap();
        assert_eq!(cfg.analytics.mock_seed, 7);
    }
}
