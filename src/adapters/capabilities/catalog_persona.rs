//! Persona researcher backed by a built-in catalogue of user archetypes.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::CapabilityError;
use crate::domain::models::PersonaProfile;
use crate::domain::ports::PersonaResearcher;

/// A catalogued user archetype.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub key: &'static str,
    pub age_range: &'static str,
    pub tech_proficiency: &'static str,
    pub device_preference: &'static str,
    pub experience: &'static str,
    pub behavioral_traits: &'static [&'static str],
    pub known_pain_points: &'static [&'static str],
}

impl Archetype {
    fn background(&self) -> String {
        format!(
            "Aged {}, {} tech proficiency, mostly on {}, {}. Typically struggles with: {}.",
            self.age_range,
            self.tech_proficiency,
            self.device_preference,
            self.experience,
            self.known_pain_points.join(", ").to_lowercase(),
        )
    }

    fn profile(&self, persona_type: &str) -> PersonaProfile {
        PersonaProfile::new(
            persona_type,
            self.background(),
            self.behavioral_traits.iter().map(|t| (*t).to_string()).collect(),
        )
    }
}

const ARCHETYPES: [Archetype; 4] = [
    Archetype {
        key: "tech_savvy",
        age_range: "25-35",
        tech_proficiency: "high",
        device_preference: "desktop",
        experience: "expert internet user",
        behavioral_traits: &[
            "Navigates fast and explores freely",
            "Low tolerance for errors",
            "Uses keyboard shortcuts frequently",
            "Multitasks across tabs",
            "Looks for advanced features and customization",
        ],
        known_pain_points: &[
            "Slow loading times",
            "Unnecessary confirmation dialogs",
            "Limited customization options",
            "Lack of keyboard shortcuts",
        ],
    },
    Archetype {
        key: "novice",
        age_range: "45-65",
        tech_proficiency: "low",
        device_preference: "tablet",
        experience: "beginner internet user",
        behavioral_traits: &[
            "Navigates slowly and reads everything",
            "Tolerant of errors but easily lost",
            "Rarely explores beyond the obvious path",
            "Prefers clear instructions and large buttons",
            "Relies on familiar patterns and step-by-step guidance",
        ],
        known_pain_points: &[
            "Complex interfaces",
            "Small text and buttons",
            "Unclear error messages",
            "Too many options at once",
        ],
    },
    Archetype {
        key: "accessibility_focused",
        age_range: "30-50",
        tech_proficiency: "medium",
        device_preference: "desktop",
        experience: "relies on a screen reader, high contrast and keyboard-only navigation",
        behavioral_traits: &[
            "Explores methodically",
            "Navigates primarily by keyboard",
            "Uses assistive technology",
            "Expects visible focus indicators and descriptive alt text",
        ],
        known_pain_points: &[
            "Inaccessible forms",
            "Missing alt text",
            "Poor keyboard navigation",
            "Low contrast text",
        ],
    },
    Archetype {
        key: "mobile_first",
        age_range: "18-30",
        tech_proficiency: "high",
        device_preference: "mobile",
        experience: "usually on the go",
        behavioral_traits: &[
            "Navigates fast with touch and swipe gestures",
            "Low tolerance for errors",
            "Short attention span",
            "Expects thumb-friendly quick actions",
        ],
        known_pain_points: &[
            "Small touch targets",
            "Slow mobile loading",
            "Desktop-only features",
            "Poor touch responsiveness",
        ],
    },
];

/// Baseline used for roles that are not catalogued.
const BASELINE: usize = 1;

/// Normalize a role description into a catalogue key.
fn normalize(persona_type: &str) -> String {
    persona_type
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolves personas from the catalogue. Unknown roles are modelled on the
/// novice baseline but keep their own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogPersonaResearcher;

impl CatalogPersonaResearcher {
    pub const fn new() -> Self {
        Self
    }

    /// Every catalogued archetype, in display order.
    pub const fn archetypes() -> &'static [Archetype] {
        &ARCHETYPES
    }

    pub fn lookup(persona_type: &str) -> Option<&'static Archetype> {
        let key = normalize(persona_type);
        ARCHETYPES.iter().find(|a| a.key == key)
    }
}

#[async_trait]
impl PersonaResearcher for CatalogPersonaResearcher {
    fn name(&self) -> &'static str {
        "catalog-persona-researcher"
    }

    async fn research(&self, persona_type: &str) -> Result<PersonaProfile, CapabilityError> {
        let requested = persona_type.trim();
        if requested.is_empty() {
            return Err(CapabilityError::Malformed("persona type is empty".to_string()));
        }

        let profile = match Self::lookup(requested) {
            Some(archetype) => archetype.profile(archetype.key),
            None => {
                debug!(persona_type = requested, "Persona not catalogued, using novice baseline");
                ARCHETYPES[BASELINE].profile(requested)
            }
        };
        Ok(profile)
    }
}
