//! Domain layer for the critique engine
//!
//! This module contains core business types, the fault taxonomy and the
//! capability ports.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AttemptFailure, CapabilityError, DomainError, DomainResult};
