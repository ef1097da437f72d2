// common/src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use config::{Config as ConfigFile, File, Environment};

/// Central configuration for the signup client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the activities backend, e.g. `http://127.0.0.1:8000`
    pub api_base_url: String,
    /// Seconds a success/error notice stays visible
    pub notice_ttl_secs: u64,

    // Durable token storage configuration
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    pub token_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            notice_ttl_secs: 5,

            storage: StorageConfig {
                path: "./data/storage.json".to_string(),
                token_key: "authToken".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Locate the config directory
        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        let defaults = Self::default();

        let config = ConfigFile::builder()
            // Built-in defaults so partial files still deserialize
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("notice_ttl_secs", defaults.notice_ttl_secs)?
            .set_default("storage.path", defaults.storage.path)?
            .set_default("storage.token_key", defaults.storage.token_key)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add environment specific config
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            // Add a local config file for local overrides
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables with prefix "APP"
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from files, falling back to plain environment variables
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            },
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");

                let defaults = Self::default();

                let api_base_url = env::var("API_BASE_URL")
                    .unwrap_or(defaults.api_base_url);

                let notice_ttl_secs = env::var("NOTICE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(defaults.notice_ttl_secs);

                let storage_path = env::var("TOKEN_STORAGE_PATH")
                    .unwrap_or(defaults.storage.path);

                let token_key = env::var("TOKEN_STORAGE_KEY")
                    .unwrap_or(defaults.storage.token_key);

                Self {
                    api_base_url,
                    notice_ttl_secs,
                    storage: StorageConfig {
                        path: storage_path,
                        token_key,
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_well_known_token_key() {
        let config = Config::default();
        assert_eq!(config.storage.token_key, "authToken");
        assert_eq!(config.notice_ttl_secs, 5);
    }

    #[test]
    fn test_load_reads_files_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "api_base_url = \"http://backend.test:9000\"\n[storage]\ntoken_key = \"customKey\"\n",
        )
        .unwrap();

        env::set_var("CONFIG_DIR", dir.path());
        let config = Config::load();
        env::remove_var("CONFIG_DIR");

        let config = config.unwrap();
        assert_eq!(config.api_base_url, "http://backend.test:9000");
        assert_eq!(config.storage.token_key, "customKey");
        // Unset keys keep their defaults
        assert_eq!(config.storage.path, "./data/storage.json");
        assert_eq!(config.notice_ttl_secs, 5);
    }
}
