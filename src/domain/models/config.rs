use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::instruction::TestingInstruction;

/// Main configuration for a critique run.
///
/// Built once at startup by the config loader and passed by reference into
/// the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// URL of the application under test
    #[serde(default)]
    pub app_url: String,

    /// Role description of the simulated user
    #[serde(default)]
    pub persona_type: String,

    /// Instructions to execute; optional
    #[serde(default)]
    pub testing_instructions: Vec<TestingInstruction>,

    /// Path to a navigation script for the replay navigator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_script: Option<String>,

    /// Execution pacing and deadlines
    #[serde(default)]
    pub engine: EngineConfig,

    /// Score derivation policy
    #[serde(default)]
    pub scoring: ScoringPolicy,

    /// Built-in keyword judge settings
    #[serde(default)]
    pub judge: JudgeConfig,

    /// Report rendering options
    #[serde(default)]
    pub report: ReportConfig,

    /// Reference numbers for the competitive analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkConfig>,

    /// Competing products listed in the competitive analysis
    #[serde(default)]
    pub competitors: Vec<Competitor>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Execution pacing and deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Per-attempt navigation timeout in seconds
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Pause between consecutive attempts of one instruction
    #[serde(default)]
    pub attempt_delay_ms: u64,

    /// Run-level deadline, checked between instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_timeout_secs: Option<u64>,
}

const fn default_attempt_timeout_secs() -> u64 {
    120
}

impl EngineConfig {
    pub const fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub const fn attempt_delay(&self) -> Duration {
        Duration::from_millis(self.attempt_delay_ms)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            attempt_timeout_secs: default_attempt_timeout_secs(),
            attempt_delay_ms: 0,
            run_timeout_secs: None,
        }
    }
}

/// Coefficients for turning session metrics into scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringPolicy {
    /// Load time at or below which performance is perfect
    #[serde(default = "default_load_time_threshold_secs")]
    pub load_time_threshold_secs: f64,

    /// Load time at or above which performance is zero
    #[serde(default = "default_load_time_ceiling_secs")]
    pub load_time_ceiling_secs: f64,

    /// Weight of the bounce rate in the usability penalty
    #[serde(default = "default_bounce_weight")]
    pub bounce_weight: f64,

    /// Weight of the error rate in the usability penalty
    #[serde(default = "default_error_weight")]
    pub error_weight: f64,

    /// Share of performance in the overall score; usability gets the rest
    #[serde(default = "default_performance_weight")]
    pub performance_weight: f64,
}

const fn default_load_time_threshold_secs() -> f64 {
    2.0
}

const fn default_load_time_ceiling_secs() -> f64 {
    10.0
}

const fn default_bounce_weight() -> f64 {
    0.4
}

const fn default_error_weight() -> f64 {
    0.6
}

const fn default_performance_weight() -> f64 {
    0.4
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            load_time_threshold_secs: default_load_time_threshold_secs(),
            load_time_ceiling_secs: default_load_time_ceiling_secs(),
            bounce_weight: default_bounce_weight(),
            error_weight: default_error_weight(),
            performance_weight: default_performance_weight(),
        }
    }
}

/// Settings for the built-in keyword judge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JudgeConfig {
    /// Fraction of success-criteria keywords the outcome must mention
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,
}

const fn default_min_coverage() -> f64 {
    0.75
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            min_coverage: default_min_coverage(),
        }
    }
}

/// Report rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    /// Pain points shown in the executive summary
    #[serde(default = "default_top_pain_points")]
    pub top_pain_points: usize,

    /// User quotes shown in the interview feedback
    #[serde(default = "default_max_quotes")]
    pub max_quotes: usize,

    /// Where the CLI writes the Markdown report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

const fn default_top_pain_points() -> usize {
    3
}

const fn default_max_quotes() -> usize {
    3
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_pain_points: default_top_pain_points(),
            max_quotes: default_max_quotes(),
            output_path: None,
        }
    }
}

/// Benchmark figures to compare the session against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchmarkConfig {
    pub page_load_time_seconds: f64,
}

/// A competing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Competitor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
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
            log_dir: None,
        }
    }
}
