//! Client configuration.
//!
//! `ClientConfig` is the only configuration surface of the client. It can be
//! built in code, deserialized from a loosely-typed JSON map, loaded from a
//! TOML file, or read from the environment. Keys other than the five
//! recognized ones are ignored wherever the input comes from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants;
use crate::error::{AddonsError, AddonsResult};

/// Caller-supplied client configuration.
///
/// Every field is optional; unset fields fall back to the defaults in
/// [`crate::constants`] when the client is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Automatic pagination flag. Accepted and stored, but no request
    /// currently changes behaviour based on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_paginate: Option<bool>,

    /// Request timeout, stored in files as seconds (fractions allowed).
    #[serde(
        default,
        rename = "timeout_secs",
        alias = "timeout",
        with = "opt_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,

    /// Bearer token sent as `Authorization: Bearer <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API root override (tests, proxies, callback-only flows).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Extra headers. These win over every header the client sets itself.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_auto_paginate(mut self, auto_paginate: bool) -> Self {
        self.auto_paginate = Some(auto_paginate);
        self
    }

    /// Add one extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Copy the recognized keys of `config` into a fresh configuration.
    ///
    /// Returns an empty configuration when `config` is `None`. Keys holding
    /// a falsy value (`false`, zero timeout, empty string, empty map) are
    /// dropped.
    pub fn sanitize(config: Option<&ClientConfig>) -> ClientConfig {
        let Some(config) = config else {
            return ClientConfig::default();
        };

        ClientConfig {
            auto_paginate: config.auto_paginate.filter(|enabled| *enabled),
            timeout: config.timeout.filter(|t| !t.is_zero()),
            token: config.token.clone().filter(|t| !t.is_empty()),
            base_url: config.base_url.clone().filter(|u| !u.is_empty()),
            headers: config.headers.clone(),
        }
    }

    /// Build a configuration from an arbitrary JSON map.
    ///
    /// Unknown keys are silently dropped; a recognized key with the wrong
    /// type is a configuration error.
    pub fn from_value(value: serde_json::Value) -> AddonsResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| AddonsError::Config(format!("invalid client configuration: {e}")))
    }

    /// Read `ADDONS_API_TOKEN`, `ADDONS_API_BASE_URL` and
    /// `ADDONS_API_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> AddonsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AddonsResult<Self> {
        let timeout = match lookup(constants::env::TIMEOUT_SECS) {
            Some(raw) => {
                let secs: f64 = raw.trim().parse().map_err(|e| {
                    AddonsError::Config(format!(
                        "{} must be a number of seconds: {e}",
                        constants::env::TIMEOUT_SECS
                    ))
                })?;
                let timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
                    AddonsError::Config(format!("{}: {e}", constants::env::TIMEOUT_SECS))
                })?;
                Some(timeout)
            }
            None => None,
        };

        Ok(Self {
            timeout,
            token: lookup(constants::env::TOKEN),
            base_url: lookup(constants::env::BASE_URL),
            ..Self::default()
        })
    }

    /// Layer `other` on top of `self`. Set fields in `other` win; headers
    /// are merged key by key.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.auto_paginate.is_some() {
            self.auto_paginate = other.auto_paginate;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        self.headers.extend(other.headers);
        self
    }

    /// Load configuration from the default config file path, or an empty
    /// configuration if the file does not exist.
    pub fn load_default() -> AddonsResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> AddonsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration as TOML, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> AddonsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AddonsError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `<platform config dir>/addons-api/config.toml`.
    pub fn default_config_path() -> AddonsResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| AddonsError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::LIBRARY_NAME).join("config.toml"))
    }

    pub fn effective_auto_paginate(&self) -> bool {
        self.auto_paginate.unwrap_or(constants::DEFAULT_AUTO_PAGINATE)
    }

    pub fn effective_timeout(&self) -> Duration {
        self.timeout
            .unwrap_or(Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS))
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(constants::BASE_URL)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod opt_secs {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    // Whole durations stay integers so hand-written files round-trip.
    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) if d.subsec_nanos() == 0 => s.serialize_some(&d.as_secs()),
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_none_is_empty() {
        assert_eq!(ClientConfig::sanitize(None), ClientConfig::default());
    }

    #[test]
    fn test_sanitize_drops_falsy_values() {
        let config = ClientConfig {
            auto_paginate: Some(false),
            timeout: Some(Duration::ZERO),
            token: Some(String::new()),
            base_url: Some(String::new()),
            headers: HashMap::new(),
        };
        assert_eq!(ClientConfig::sanitize(Some(&config)), ClientConfig::default());
    }

    #[test]
    fn test_sanitize_keeps_set_values() {
        let config = ClientConfig::new()
            .with_auto_paginate(true)
            .with_timeout(Duration::from_secs(3))
            .with_token("abc")
            .with_base_url("http://localhost:9000/")
            .with_header("X-Trace", "1");
        assert_eq!(ClientConfig::sanitize(Some(&config)), config);
    }

    #[test]
    fn test_from_value_ignores_unknown_keys() {
        let config = ClientConfig::from_value(json!({
            "token": "abc",
            "logger": "stderr",
            "retries": 5,
            "headers": null,
            "timeout": 30
        }))
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_from_value_rejects_wrong_types() {
        let result = ClientConfig::from_value(json!({"timeout": "soon"}));
        assert!(matches!(result, Err(AddonsError::Config(_))));
    }

    #[test]
    fn test_fractional_timeout() {
        let config = ClientConfig::from_value(json!({"timeout": 2.5})).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));

        let config: ClientConfig = toml::from_str("timeout_secs = 0.25").unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let result = ClientConfig::from_value(json!({"timeout": -1.0}));
        assert!(matches!(result, Err(AddonsError::Config(_))));
    }

    #[test]
    fn test_effective_defaults() {
        let config = ClientConfig::default();
        assert!(config.effective_auto_paginate());
        assert_eq!(config.effective_timeout(), Duration::from_secs(10));
        assert_eq!(config.effective_base_url(), "https://api.addons.io/");
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            "ADDONS_API_TOKEN" => Some("env-token".into()),
            "ADDONS_API_TIMEOUT_SECS" => Some(" 25 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("env-token"));
        assert_eq!(config.timeout, Some(Duration::from_secs(25)));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_from_lookup_fractional_timeout() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "ADDONS_API_TIMEOUT_SECS").then(|| "1.5".to_string())
        })
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let result = ClientConfig::from_lookup(|key| {
            (key == "ADDONS_API_TIMEOUT_SECS").then(|| "ten".to_string())
        });
        assert!(matches!(result, Err(AddonsError::Config(_))));
    }

    #[test]
    fn test_merge_prefers_other() {
        let file = ClientConfig::new()
            .with_token("file-token")
            .with_base_url("http://file")
            .with_header("A", "1");
        let env = ClientConfig::new().with_token("env-token").with_header("B", "2");
        let merged = file.merge(env);
        assert_eq!(merged.token.as_deref(), Some("env-token"));
        assert_eq!(merged.base_url.as_deref(), Some("http://file"));
        assert_eq!(merged.headers.len(), 2);
    }

    #[test]
    fn test_roundtrip_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ClientConfig::new()
            .with_token("abc")
            .with_timeout(Duration::from_secs(15))
            .with_header("X-Custom", "yes");
        config.save_to_file(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("timeout_secs = 15\n"));

        let loaded = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = [").unwrap();
        assert!(matches!(
            ClientConfig::load_from_file(&path),
            Err(AddonsError::Config(_))
        ));
    }
}
