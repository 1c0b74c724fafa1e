//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use console::style;
use std::path::Path;

use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Exit status for any failure that is not classified below
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for invalid configuration or input
pub const EXIT_VALIDATION: i32 = 2;
/// Exit status for a collaborator that broke its contract
pub const EXIT_CONTRACT: i32 = 3;

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<Config, DomainError> {
    ConfigLoader::load_from_file(path).map_err(DomainError::from)
}

/// Install the global subscriber for the configured logging.
///
/// A logging failure never stops a run; it is reported and the run carries on
/// without structured logs. The returned logger must be kept alive to flush
/// file output.
pub fn init_logging(config: &Config) -> Option<LoggerImpl> {
    match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("{} logging disabled: {err:#}", style("Warning:").yellow());
            None
        }
    }
}

/// Map an error to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DomainError>())
        .map_or(EXIT_FAILURE, |domain| match domain {
            DomainError::ValidationFault(_) => EXIT_VALIDATION,
            DomainError::CollaboratorContractFault { .. } => EXIT_CONTRACT,
        })
}

/// Report a failed command and terminate the process.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let code = exit_code(&err);
    if json_mode {
        let body = serde_json::json!({
            "error": format!("{err:#}"),
            "exit_code": code,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err}", style("Error:").red().bold());
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(code)
}
