use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::models::config::Config;
use crate::infrastructure::logging::LogFormat;
use crate::services::ScoreCalculator;

/// Prefix for environment overrides; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "CRITIQUER_";

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported configuration format: {0}. Expected a .yaml or .yml file")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("app_url cannot be empty")]
    EmptyAppUrl,

    #[error("persona_type cannot be empty")]
    EmptyPersonaType,

    #[error("Invalid testing instruction #{index}: {reason}")]
    InvalidInstruction { index: usize, reason: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid top_pain_points: {0}. Must be at least 1")]
    InvalidTopPainPoints(usize),

    #[error("Invalid attempt_timeout_secs: {0}. Must be at least 1")]
    InvalidAttemptTimeout(u64),

    #[error("Invalid judge.min_coverage: {0}. Must be between 0 and 1")]
    InvalidMinCoverage(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        Self::ValidationFault(err.to_string())
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The given YAML file
    /// 3. Environment variables (`CRITIQUER_*` prefix, highest priority)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if !is_yaml {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.app_url.trim().is_empty() {
            return Err(ConfigError::EmptyAppUrl);
        }
        if config.persona_type.trim().is_empty() {
            return Err(ConfigError::EmptyPersonaType);
        }

        for (index, instruction) in config.testing_instructions.iter().enumerate() {
            instruction
                .validate()
                .map_err(|reason| ConfigError::InvalidInstruction { index, reason })?;
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if LogFormat::parse(&config.logging.format).is_none() {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.report.top_pain_points == 0 {
            return Err(ConfigError::InvalidTopPainPoints(config.report.top_pain_points));
        }

        if config.engine.attempt_timeout_secs == 0 {
            return Err(ConfigError::InvalidAttemptTimeout(config.engine.attempt_timeout_secs));
        }

        let min_coverage = config.judge.min_coverage;
        if !(0.0..=1.0).contains(&min_coverage) {
            return Err(ConfigError::InvalidMinCoverage(min_coverage.to_string()));
        }

        ScoreCalculator::validate_policy(&config.scoring)
            .map_err(|e| ConfigError::ValidationFailed(e.to_string()))?;

        if let Some(benchmark) = &config.benchmark {
            let load = benchmark.page_load_time_seconds;
            if !load.is_finite() || load < 0.0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "benchmark.page_load_time_seconds must be non-negative, got {load}"
                )));
            }
        }

        for competitor in &config.competitors {
            if competitor.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "competitor name cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
