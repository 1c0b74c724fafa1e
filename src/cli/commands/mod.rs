//! CLI command implementations.

pub mod personas;
pub mod run;
pub mod validate;
