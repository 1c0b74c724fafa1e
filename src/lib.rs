//! Critiquer - persona-driven usability critiques
//!
//! Critiquer simulates a user persona working through a prioritized list of
//! testing instructions against a web application, measures the session,
//! interviews the persona afterwards and renders a seven-section critique
//! report.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy and capability ports
//! - **Service Layer** (`services`): The critique pipeline
//! - **Adapters Layer** (`adapters`): Capability implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use critiquer::{Capabilities, ConfigLoader, CritiqueEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load_from_file("critique.yaml")?;
//!     let run = CritiqueEngine::new(&config, capabilities()).run().await?;
//!     println!("{}", run.report.to_markdown());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{AttemptFailure, CapabilityError, DomainError, DomainResult};
pub use domain::models::{
    Config, CritiqueReport, DerivedScores, FindingsModel, InstructionOutcome, InstructionPriority,
    OutcomeStatus, PersonaProfile, ScoreLabel, SectionKind, SessionMetrics, TestingInstruction,
};
pub use domain::ports::{Interviewer, Judge, Navigator, PersonaResearcher};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Capabilities, CritiqueEngine, CritiqueRun};
