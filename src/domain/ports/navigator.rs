//! Navigation port - interface for the browser-driving capability.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;
use crate::domain::models::{NavigationReport, PersonaProfile};

/// Drives the target application on behalf of a persona.
///
/// Implementations share one browser session, so the engine never calls
/// `navigate` concurrently.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Get the navigator name, used in logs and contract faults.
    fn name(&self) -> &'static str;

    /// Attempt `task` as the given persona.
    ///
    /// Returns `CapabilityError::Transient` when the navigator could not
    /// answer this time and `CapabilityError::Malformed` when its response
    /// could not be understood.
    async fn navigate(
        &self,
        task: &str,
        persona: &PersonaProfile,
    ) -> Result<NavigationReport, CapabilityError>;
}
