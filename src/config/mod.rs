//! Configuration (layered: explicit setters > env > config file).
//!
//! A [`ScoutConfig`] is built once at process start and handed to whatever
//! needs credentials or endpoints. Nothing reads the environment after that.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ScoutError};
use crate::types::DEFAULT_TEMPERATURE;

/// Model used when neither the file nor the environment names one.
pub const DEFAULT_MODEL: &str = "openai:gpt-4o-mini";

const ENV_API_KEYS: [(&str, &str); 4] = [
    ("OPENAI_API_KEY", "openai"),
    ("OPENAI_COMPAT_API_KEY", "openai-compatible"),
    ("EVENTBRITE_API_KEY", "eventbrite"),
    ("TICKETMASTER_API_KEY", "ticketmaster"),
];

const ENV_BASE_URLS: [(&str, &str); 4] = [
    ("OPENAI_BASE_URL", "openai"),
    ("OPENAI_COMPAT_BASE_URL", "openai-compatible"),
    ("EVENTBRITE_BASE_URL", "eventbrite"),
    ("TICKETMASTER_BASE_URL", "ticketmaster"),
];

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    model: Option<String>,
    temperature: Option<f64>,
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
}

/// Process-wide configuration for eventscout.
#[derive(Clone, Default)]
pub struct ScoutConfig {
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
    model: Option<String>,
    temperature: Option<f64>,
}

impl fmt::Debug for ScoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<_> = self.api_keys.keys().collect();
        providers.sort();
        f.debug_struct("ScoutConfig")
            .field("api_keys", &providers)
            .field("base_urls", &self.base_urls)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ScoutConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the default config file (if present), then apply the environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::new(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from environment variables only.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.apply_env();
        config
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        if let Some(t) = file.temperature {
            validate_temperature(t)?;
        }
        Ok(Self {
            api_keys: file.api_keys,
            base_urls: file.base_urls,
            model: file.model,
            temperature: file.temperature,
        })
    }

    /// Overlay environment variables (and `.env`, if present) onto this config.
    pub fn apply_env(&mut self) {
        let _ = dotenvy::dotenv(); // a missing .env is fine

        for (env_var, provider) in &ENV_API_KEYS {
            if let Some(key) = non_empty_env(env_var) {
                self.set_api_key(provider, key);
            }
        }
        for (env_var, provider) in &ENV_BASE_URLS {
            if let Some(url) = non_empty_env(env_var) {
                self.set_base_url(provider, url);
            }
        }
        if let Some(model) = non_empty_env("EVENTSCOUT_MODEL") {
            self.model = Some(model);
        }
        if let Some(raw) = non_empty_env("EVENTSCOUT_TEMPERATURE") {
            match raw.parse::<f64>() {
                Ok(t) if validate_temperature(t).is_ok() => self.temperature = Some(t),
                _ => tracing::warn!(value = %raw, "ignoring invalid EVENTSCOUT_TEMPERATURE"),
            }
        }
    }

    pub fn set_api_key(&mut self, provider: &str, key: String) {
        self.api_keys.insert(provider.to_string(), key);
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.get(provider).cloned()
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.api_keys.contains_key(provider)
    }

    pub fn set_base_url(&mut self, provider: &str, url: String) {
        self.base_urls.insert(provider.to_string(), url);
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.get(provider).cloned()
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    /// Configured model string, `provider:model`.
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        validate_temperature(temperature)?;
        self.temperature = Some(temperature);
        Ok(())
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

/// `<config dir>/eventscout/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "eventscout")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_temperature(t: f64) -> Result<()> {
    if (0.0..=2.0).contains(&t) {
        Ok(())
    } else {
        Err(ScoutError::Configuration(format!(
            "temperature must be within 0.0..=2.0, got {t}"
        )))
    }
}
