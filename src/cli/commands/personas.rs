//! Implementation of the `critiquer personas` command.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use crate::adapters::capabilities::{Archetype, CatalogPersonaResearcher};
use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};

#[derive(Debug, Serialize)]
pub struct PersonaRow {
    pub persona_type: &'static str,
    pub age_range: &'static str,
    pub tech_proficiency: &'static str,
    pub device_preference: &'static str,
    pub behavioral_traits: &'static [&'static str],
    pub known_pain_points: &'static [&'static str],
}

impl From<&Archetype> for PersonaRow {
    fn from(archetype: &Archetype) -> Self {
        Self {
            persona_type: archetype.key,
            age_range: archetype.age_range,
            tech_proficiency: archetype.tech_proficiency,
            device_preference: archetype.device_preference,
            behavioral_traits: archetype.behavioral_traits,
            known_pain_points: archetype.known_pain_points,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonaListOutput {
    pub personas: Vec<PersonaRow>,
}

impl CommandOutput for PersonaListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["persona", "age", "proficiency", "device", "traits"]);
        for persona in &self.personas {
            table.add_row(vec![
                Cell::new(persona.persona_type),
                Cell::new(persona.age_range),
                Cell::new(persona.tech_proficiency),
                Cell::new(persona.device_preference),
                Cell::new(persona.behavioral_traits.len()),
            ]);
        }
        let mut rendered = render_list("persona", &table, self.personas.len());
        rendered.push_str("\nUnlisted persona types are researched with the novice baseline.");
        rendered
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json_mode: bool) -> Result<()> {
    let personas = CatalogPersonaResearcher::archetypes()
        .iter()
        .map(PersonaRow::from)
        .collect();
    output(&PersonaListOutput { personas }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_archetype() {
        let personas: Vec<PersonaRow> = CatalogPersonaResearcher::archetypes()
            .iter()
            .map(PersonaRow::from)
            .collect();
        let result = PersonaListOutput { personas };

        let json = result.to_json();
        assert_eq!(json["personas"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["personas"][0]["persona_type"], "tech_savvy");
        assert!(result.to_human().contains("mobile_first"));
    }
}
