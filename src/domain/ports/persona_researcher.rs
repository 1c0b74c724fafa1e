//! Persona-research port - turns a role description into a persona profile.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;
use crate::domain::models::PersonaProfile;

#[async_trait]
pub trait PersonaResearcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn research(&self, persona_type: &str) -> Result<PersonaProfile, CapabilityError>;
}
