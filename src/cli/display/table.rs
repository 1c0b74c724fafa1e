//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

use crate::domain::models::{OutcomeStatus, ScoreLabel};

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {entity_name}s found.");
    }
    let noun = if total == 1 {
        entity_name.to_string()
    } else {
        format!("{entity_name}s")
    };
    format!("{} {noun}:\n{table}", style(total).bold())
}

pub fn styled_status(status: OutcomeStatus) -> String {
    match status {
        OutcomeStatus::Succeeded => style(status.as_str()).green().to_string(),
        OutcomeStatus::FallbackInvoked => style(status.as_str()).red().to_string(),
        OutcomeStatus::Skipped => style(status.as_str()).yellow().to_string(),
    }
}

pub fn styled_label(label: ScoreLabel) -> String {
    match label {
        ScoreLabel::Excellent | ScoreLabel::Good => style(label.as_str()).green().to_string(),
        ScoreLabel::Moderate => style(label.as_str()).yellow().to_string(),
        ScoreLabel::Poor => style(label.as_str()).red().to_string(),
    }
}
