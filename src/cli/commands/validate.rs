//! Implementation of the `critiquer validate` command.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::display::{list_table, render_list};
use crate::cli::load_config;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Config, TestingInstruction};
use crate::services::{CritiqueEngine, InstructionScheduler};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub valid: bool,
    pub app_url: String,
    pub persona_type: String,
    pub navigation_script: Option<String>,
    pub execution_order: Vec<TestingInstruction>,
}

impl ValidateOutput {
    fn new(config: &Config) -> Self {
        Self {
            valid: true,
            app_url: config.app_url.clone(),
            persona_type: config.persona_type.clone(),
            navigation_script: config.navigation_script.clone(),
            execution_order: InstructionScheduler::execution_order(&config.testing_instructions)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["#", "task", "priority", "attempts", "success criteria"]);
        for (position, instruction) in self.execution_order.iter().enumerate() {
            table.add_row(vec![
                Cell::new(position + 1),
                Cell::new(truncate(&instruction.task, 40)),
                Cell::new(instruction.priority),
                Cell::new(instruction.max_attempts),
                Cell::new(truncate(&instruction.success_criteria, 50)),
            ]);
        }

        format!(
            "Configuration is valid: {} as a {} persona\n{}",
            self.app_url,
            self.persona_type,
            render_list("instruction", &table, self.execution_order.len())
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ValidateArgs, json_mode: bool) -> Result<()> {
    let config = load_config(&args.config)?;
    CritiqueEngine::preflight(&config)?;
    output(&ValidateOutput::new(&config), json_mode);
    Ok(())
}
