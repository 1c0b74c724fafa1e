//! Persona profile produced once per run by the persona-research capability.

use serde::{Deserialize, Serialize};

/// Structured description of the simulated user driving navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    #[serde(rename = "type")]
    pub persona_type: String,
    pub background: String,
    #[serde(default)]
    pub behavioral_traits: Vec<String>,
}

impl PersonaProfile {
    pub fn new(
        persona_type: impl Into<String>,
        background: impl Into<String>,
        behavioral_traits: Vec<String>,
    ) -> Self {
        Self {
            persona_type: persona_type.into(),
            background: background.into(),
            behavioral_traits,
        }
    }

    /// Profile used when research is unavailable: only the role is known.
    pub fn unresearched(persona_type: impl Into<String>) -> Self {
        Self::new(persona_type, "No persona research was available for this run.", vec![])
    }

    pub(crate) fn contract_violation(&self) -> Option<String> {
        if self.persona_type.trim().is_empty() {
            return Some("persona profile has an empty type".to_string());
        }
        if self.background.trim().is_empty() {
            return Some(format!("persona profile '{}' has an empty background", self.persona_type));
        }
        None
    }
}
