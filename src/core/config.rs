//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::errors::{Result, TranslationError};

/// Server used when nothing else is configured
pub const DEFAULT_URL: &str = "http://localhost:1188";

/// Environment variable overriding the server URL
pub const URL_ENV: &str = "DEEPLX_URL";

/// Environment variables overriding the token, in lookup order
pub const TOKEN_ENVS: &[&str] = &["TOKEN", "DEEPLX_TOKEN"];

const CONFIG_DIR: &str = "translate";
const CONFIG_FILENAME: &str = "config.json";

/// Persisted user defaults, stored in `<config dir>/translate/config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Server used when neither flag nor environment names one
    #[serde(default, skip_serializing_if = "is_unset")]
    pub default_url: Option<String>,
    /// Token used when neither flag nor environment supplies one
    #[serde(default, skip_serializing_if = "is_unset")]
    pub default_token: Option<String>,
}

fn is_unset(value: &Option<String>) -> bool {
    non_empty(value.as_deref()).is_none()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl CliConfig {
    /// Location of the config file for the current user
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Load the user's config, falling back to defaults on any failure
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Config not read from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the user's config file
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path().ok_or_else(|| TranslationError::Config {
            message: "cannot determine the user config directory".to_string(),
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to file, creating its directory if needed
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Neither a URL nor a token has been stored yet
    pub fn is_empty(&self) -> bool {
        self.url().is_none() && self.token().is_none()
    }

    /// Stored server URL, if any
    pub fn url(&self) -> Option<&str> {
        non_empty(self.default_url.as_deref())
    }

    /// Stored token, if any
    pub fn token(&self) -> Option<&str> {
        non_empty(self.default_token.as_deref())
    }
}

/// Effective connection settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Server URL to talk to
    pub url: String,
    /// Non-blank token, if any layer supplied one
    pub token: Option<String>,
}

impl Settings {
    /// Resolve settings with priority flag > environment > config > default.
    ///
    /// `env` looks up an environment variable; empty values count as unset
    /// at every layer.
    pub fn resolve<F>(
        flag_url: Option<&str>,
        flag_token: Option<&str>,
        config: &CliConfig,
        env: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_url = env(URL_ENV);
        let url = non_empty(flag_url)
            .or_else(|| non_empty(env_url.as_deref()))
            .or_else(|| config.url())
            .unwrap_or(DEFAULT_URL)
            .to_string();

        let env_token = TOKEN_ENVS
            .iter()
            .filter_map(|&name| env(name))
            .find(|value| !value.trim().is_empty());
        let token = non_empty(flag_token)
            .or_else(|| non_empty(env_token.as_deref()))
            .or_else(|| config.token())
            .map(str::to_string);

        Self { url, token }
    }

    /// Resolve against the process environment
    pub fn from_env(flag_url: Option<&str>, flag_token: Option<&str>, config: &CliConfig) -> Self {
        Self::resolve(flag_url, flag_token, config, |name| std::env::var(name).ok())
    }
}
