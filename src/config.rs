// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the console

pub mod environment;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{env_names, service};
use crate::endpoint;
pub use environment::Environment;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    /// Fixed API origin; when unset the origin is resolved from the environment
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Output format (json, pretty, compact)
    pub format: Option<String>,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(service::SERVICE_NAME).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load the config file at `path` (or the default location); a missing file yields defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Load using the path named by the environment, if any
    pub fn load_from_env(env: &Environment) -> Result<Self> {
        Self::load(env.get(env_names::CONFIG_PATH).map(PathBuf::from))
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let parent = Path::new(&config_path)
            .parent()
            .context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.api.base_url {
            let url = url::Url::parse(base)
                .with_context(|| format!("Invalid api.base_url: {}", base))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!(
                    "api.base_url must use http or https, got {}",
                    url.scheme()
                ));
            }
        }
        Ok(())
    }

    /// The API origin for this session: the config file wins over the environment
    pub fn api_base(&self, env: &Environment) -> String {
        match &self.api.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => endpoint::resolve_with_override(env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: Some("https://octofit.example.com/api".to_string()),
            },
            logging: LoggingSettings {
                level: Some("debug".to_string()),
                format: Some("compact".to_string()),
            },
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(Some(temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = sample_config();
        config.save(Some(path.clone())).unwrap();
        assert!(path.exists());

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"not a url\"\n").unwrap();

        assert!(Config::load(Some(path)).is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let config = Config {
            api: ApiConfig {
                base_url: Some("ftp://octofit.example.com/api".to_string()),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_base_wins_over_environment() {
        let env = Environment::from_pairs([("CODESPACE_NAME", "workspace")]);
        assert_eq!(
            sample_config().api_base(&env),
            "https://octofit.example.com/api"
        );
        assert_eq!(
            Config::default().api_base(&env),
            "https://workspace-8000.app.github.dev/api"
        );
    }
}
