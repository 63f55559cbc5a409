//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("barometer")
                .join("barometer.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./barometer.db".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Seed the built-in sample dataset when the store is empty
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

fn default_seed_demo() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8092".to_string(),
                "http://127.0.0.1:8092".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            seed_demo: default_seed_demo(),
        }
    }
}

/// Collector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_quotes_url")]
    pub quotes_url: String,

    #[serde(default = "default_collect_interval")]
    pub interval_hours: u64,
}

fn default_quotes_url() -> String {
    "http://localhost:9510".to_string()
}

fn default_collect_interval() -> u64 {
    24
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            quotes_url: default_quotes_url(),
            interval_hours: default_collect_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("barometer").join("config.toml")),
            Some(PathBuf::from("/etc/barometer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Store overrides
        if let Ok(db_path) = std::env::var("BAROMETER_DB_PATH") {
            self.store.db_path = db_path;
        }

        // API overrides
        if let Ok(host) = std::env::var("BAROMETER_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("BAROMETER_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(seed) = std::env::var("BAROMETER_SEED_DEMO") {
            self.api.seed_demo = seed.to_lowercase() != "false" && seed != "0";
        }

        // Collector overrides
        if let Ok(url) = std::env::var("BAROMETER_QUOTES_URL") {
            self.collector.quotes_url = url;
        }
        if let Ok(enabled) = std::env::var("BAROMETER_COLLECTOR_ENABLED") {
            self.collector.enabled = enabled.to_lowercase() != "false" && enabled != "0";
        }

        // Logging overrides
        if let Ok(level) = std::env::var("BAROMETER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BAROMETER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            api: ApiConfig::default(),
            collector: CollectorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Barometer Configuration
#
# Environment variables override these settings:
# - BAROMETER_DB_PATH
# - BAROMETER_API_HOST
# - BAROMETER_API_PORT
# - BAROMETER_SEED_DEMO
# - BAROMETER_QUOTES_URL
# - BAROMETER_COLLECTOR_ENABLED
# - BAROMETER_LOG_LEVEL
# - BAROMETER_LOG_FORMAT

[store]
# SQLite database path
db_path = "./barometer.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:8092", "http://127.0.0.1:8092"]

# Request timeout in seconds
request_timeout_secs = 30

# Seed the built-in sample dataset when the store is empty
seed_demo = true

[collector]
# Enable the background collection sweep
enabled = false

# Market-data gateway URL
quotes_url = "http://localhost:9510"

# Sweep interval (hours)
interval_hours = 24

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/barometer/barometer.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8090);
        assert!(config.api.seed_demo);
        assert!(!config.collector.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.collector.interval_hours, 24);
    }
}
