//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::run::RunArgs;
use super::commands::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(name = "critiquer")]
#[command(about = "Critiquer - persona-driven usability critiques", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a critique and produce the report
    Run(RunArgs),

    /// Validate a configuration file and show the execution order
    Validate(ValidateArgs),

    /// List the catalogued persona archetypes
    Personas,
}
