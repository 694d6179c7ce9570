//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Where the daily content is fetched from
//! - Label locale and the role used on first run
//! - Tick and long-press timings
//!
//! Configuration is stored at `~/.config/candlelight/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use super::state::DEFAULT_ROLE;
use crate::content::{ContentSource, Locale};
use crate::error::ConfigError;

/// Content source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory path or http(s) base URL holding `prayers.json` and
    /// `predictions.json`. Defaults to `<data_dir>/content`.
    #[serde(default)]
    pub source: Option<String>,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_role")]
    pub default_role: String,
}

/// Timer cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_hold_frame_ms")]
    pub hold_frame_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/candlelight/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

// Default functions
fn default_role() -> String {
    DEFAULT_ROLE.into()
}
fn default_tick_interval_ms() -> u64 {
    250
}
fn default_hold_ms() -> u64 {
    800
}
fn default_hold_frame_ms() -> u64 {
    16
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            default_role: default_role(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            hold_ms: default_hold_ms(),
            hold_frame_ms: default_hold_frame_ms(),
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

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

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

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    // Optional fields are stored as null until first set.
                    serde_json::Value::Null => {
                        if value.is_empty() {
                            serde_json::Value::Null
                        } else {
                            serde_json::Value::String(value.into())
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// The configured content source, or `<data_dir>/content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is malformed.
    pub fn content_source(&self) -> Result<ContentSource, ConfigError> {
        match self.content.source.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map_err(|e: url::ParseError| ConfigError::InvalidValue {
                key: "content.source".into(),
                message: e.to_string(),
            }),
            None => {
                let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
                    path: PathBuf::from("content"),
                    message: e.to_string(),
                })?;
                Ok(ContentSource::Dir(dir.join("content")))
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
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
        assert_eq!(parsed.ui.locale, Locale::Ru);
        assert_eq!(parsed.timing.tick_interval_ms, 250);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[ui]\nlocale = \"en\"\n").unwrap();
        assert_eq!(parsed.ui.locale, Locale::En);
        assert_eq!(parsed.ui.default_role, "mediabuyer");
        assert_eq!(parsed.timing.hold_ms, 800);
        assert!(parsed.content.source.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.locale").as_deref(), Some("ru"));
        assert_eq!(cfg.get("timing.hold_ms").as_deref(), Some("800"));
        assert_eq!(cfg.get("content.source").as_deref(), Some(""));
        assert!(cfg.get("ui.missing_key").is_none());
    }

    #[test]
    fn apply_updates_typed_fields() {
        let mut cfg = Config::default();
        cfg.apply("timing.tick_interval_ms", "100").unwrap();
        cfg.apply("ui.locale", "en").unwrap();
        cfg.apply("content.source", "https://example.org/data").unwrap();
        assert_eq!(cfg.timing.tick_interval_ms, 100);
        assert_eq!(cfg.ui.locale, Locale::En);
        assert_eq!(cfg.content.source.as_deref(), Some("https://example.org/data"));
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.apply("ui.nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("timing.hold_ms", "soon").is_err());
        assert!(cfg.apply("ui.locale", "fr").is_err());
        assert_eq!(cfg.ui.locale, Locale::Ru);
    }

    #[test]
    fn content_source_parses_configured_url() {
        let mut cfg = Config::default();
        cfg.content.source = Some("http://localhost:9000/content".into());
        assert!(matches!(
            cfg.content_source().unwrap(),
            ContentSource::Http(_)
        ));
    }
}
