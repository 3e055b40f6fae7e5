use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::WeightConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub grading: GradingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_entries() -> u64 { 1000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradingSettings {
    #[serde(default)]
    pub default_weights: DefaultWeightsConfig,
}

/// Weights used when an upload does not specify its own
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultWeightsConfig {
    #[serde(default = "default_max_work_weight")]
    pub max_work_weight: f64,
    #[serde(default = "default_target_exam_weight")]
    pub target_exam_weight: f64,
    #[serde(default = "default_base_exam_weight")]
    pub base_exam_weight: f64,
}

impl Default for DefaultWeightsConfig {
    fn default() -> Self {
        Self {
            max_work_weight: default_max_work_weight(),
            target_exam_weight: default_target_exam_weight(),
            base_exam_weight: default_base_exam_weight(),
        }
    }
}

impl From<&DefaultWeightsConfig> for WeightConfig {
    fn from(value: &DefaultWeightsConfig) -> Self {
        WeightConfig {
            max_work_weight: value.max_work_weight,
            target_exam_weight: value.target_exam_weight,
            base_exam_weight: value.base_exam_weight,
        }
    }
}

fn default_max_work_weight() -> f64 { 4.0 }
fn default_target_exam_weight() -> f64 { 6.0 }
fn default_base_exam_weight() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GRADE_RANK)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GRADE_RANK__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GRADE_RANK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GRADE_RANK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    pub fn default_weights(&self) -> WeightConfig {
        WeightConfig::from(&self.grading.default_weights)
    }
}

/// Let the conventional DATABASE_URL variable override database.url
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
