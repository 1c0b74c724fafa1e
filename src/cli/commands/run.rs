//! Implementation of the `critiquer run` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use comfy_table::Cell;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::capabilities::{
    CatalogPersonaResearcher, KeywordJudge, ReplayNavigator, RuleBasedInterviewer,
};
use crate::cli::display::{create_spinner, list_table, styled_label, styled_status};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::cli::{init_logging, load_config};
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, DerivedScores, InstructionOutcome, OutcomeStatus};
use crate::services::{Capabilities, CritiqueEngine, CritiqueRun};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Navigation script to replay (overrides navigation_script in the config)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Write the Markdown report to this file (overrides report.output_path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeRow {
    pub task: String,
    pub priority: String,
    pub status: OutcomeStatus,
    pub attempts_used: u32,
    pub max_attempts: u32,
    pub events: usize,
}

impl From<&InstructionOutcome> for OutcomeRow {
    fn from(outcome: &InstructionOutcome) -> Self {
        Self {
            task: outcome.instruction.task.clone(),
            priority: outcome.instruction.priority.to_string(),
            status: outcome.final_status,
            attempts_used: outcome.attempts_used,
            max_attempts: outcome.instruction.max_attempts,
            events: outcome.events.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub run_id: Uuid,
    pub app_url: String,
    pub persona_type: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<OutcomeRow>,
    pub scores: DerivedScores,
    pub pain_points: usize,
    pub satisfaction_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    /// Included in JSON output when the report was not written to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_markdown: Option<String>,
}

impl RunOutput {
    fn new(
        run: &CritiqueRun,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        report_path: Option<PathBuf>,
    ) -> Self {
        let findings = &run.findings;
        Self {
            run_id: run.run_id,
            app_url: findings.context.app_url.clone(),
            persona_type: findings.persona.persona_type.clone(),
            started_at,
            finished_at,
            outcomes: findings.outcomes.iter().map(OutcomeRow::from).collect(),
            scores: findings.scores,
            pain_points: findings.pain_points.len(),
            satisfaction_score: findings.satisfaction_score,
            report_markdown: report_path.is_none().then(|| run.report.to_markdown()),
            report_path,
        }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} critique run {} for {} ({} persona)",
            style("✓").green(),
            self.run_id,
            self.app_url,
            self.persona_type
        )];

        if self.outcomes.is_empty() {
            lines.push("No testing instructions were configured.".to_string());
        } else {
            let mut table = list_table(&["task", "priority", "status", "attempts", "events"]);
            for row in &self.outcomes {
                table.add_row(vec![
                    Cell::new(truncate(&row.task, 40)),
                    Cell::new(&row.priority),
                    Cell::new(styled_status(row.status)),
                    Cell::new(format!("{}/{}", row.attempts_used, row.max_attempts)),
                    Cell::new(row.events),
                ]);
            }
            lines.push(table.to_string());
        }

        let scores = &self.scores;
        lines.push(format!(
            "Scores: overall {:.2} ({}), performance {:.2} ({}), usability {:.2} ({})",
            scores.overall_health_score,
            styled_label(scores.overall_label()),
            scores.performance_score,
            styled_label(scores.performance_label()),
            scores.usability_score,
            styled_label(scores.usability_label()),
        ));
        lines.push(format!("Pain points: {}", self.pain_points));
        if let Some(score) = self.satisfaction_score {
            lines.push(format!("Satisfaction: {score}/10"));
        }

        let elapsed = self.finished_at - self.started_at;
        lines.push(format!("Completed in {:.1}s", elapsed.num_milliseconds() as f64 / 1000.0));
        if let Some(path) = &self.report_path {
            lines.push(format!("Report written to {}", path.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolve the navigation script: the flag wins, then the config value.
/// Relative config values are resolved against the config file's directory.
/// A run without instructions needs no script.
fn script_path(args: &RunArgs, config: &Config) -> Result<Option<PathBuf>, DomainError> {
    if let Some(script) = &args.script {
        return Ok(Some(script.clone()));
    }
    let Some(configured) = config.navigation_script.as_deref() else {
        if config.testing_instructions.is_empty() {
            return Ok(None);
        }
        return Err(DomainError::ValidationFault(
            "no navigation script: pass --script or set navigation_script".to_string(),
        ));
    };
    let configured = Path::new(configured);
    if configured.is_absolute() {
        return Ok(Some(configured.to_path_buf()));
    }
    Ok(Some(args.config.parent().map_or_else(
        || configured.to_path_buf(),
        |dir| dir.join(configured),
    )))
}

fn capabilities(script: Option<&Path>, config: &Config) -> Result<Capabilities, DomainError> {
    let navigator = match script {
        Some(script) => ReplayNavigator::from_file(script)
            .map_err(|e| DomainError::ValidationFault(e.to_string()))?,
        None => ReplayNavigator::empty(),
    };

    Ok(Capabilities {
        persona_researcher: Arc::new(CatalogPersonaResearcher::new()),
        navigator: Arc::new(navigator),
        judge: Arc::new(KeywordJudge::from(&config.judge)),
        interviewer: Arc::new(RuleBasedInterviewer::new()),
    })
}

pub async fn execute(args: RunArgs, json_mode: bool) -> Result<()> {
    let config = load_config(&args.config)?;
    let _logger = init_logging(&config);

    let script = script_path(&args, &config)?;
    let capabilities = capabilities(script.as_deref(), &config)?;
    let engine = CritiqueEngine::new(&config, capabilities);

    let spinner = create_spinner(
        format!(
            "Running {} instruction(s) against {}",
            config.testing_instructions.len(),
            config.app_url
        ),
        json_mode,
    );
    let started_at = Utc::now();
    let run = engine.run().await;
    spinner.finish_and_clear();
    let run = run?;
    let finished_at = Utc::now();

    let report_path = args
        .output
        .clone()
        .or_else(|| config.report.output_path.as_ref().map(PathBuf::from));
    let markdown = run.report.to_markdown();
    if let Some(path) = &report_path {
        tokio::fs::write(path, &markdown)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    let result = RunOutput::new(&run, started_at, finished_at, report_path);
    if json_mode || result.report_path.is_some() {
        output(&result, json_mode);
    } else {
        // The report owns stdout; the summary goes to stderr
        println!("{markdown}");
        eprintln!("{}", result.to_human());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{InstructionPriority, TestingInstruction};

    fn args(config: &str, script: Option<&str>) -> RunArgs {
        RunArgs {
            config: PathBuf::from(config),
            script: script.map(PathBuf::from),
            output: None,
        }
    }

    #[test]
    fn test_script_flag_wins() {
        let config = Config {
            navigation_script: Some("from-config.yaml".to_string()),
            ..Config::default()
        };
        let path = script_path(&args("/etc/critique.yaml", Some("flag.yaml")), &config).unwrap();
        assert_eq!(path, Some(PathBuf::from("flag.yaml")));
    }

    #[test]
    fn test_relative_script_resolved_against_config_dir() {
        let config = Config {
            navigation_script: Some("scripts/nav.yaml".to_string()),
            ..Config::default()
        };
        let path = script_path(&args("/srv/critique/config.yaml", None), &config).unwrap();
        assert_eq!(path, Some(PathBuf::from("/srv/critique/scripts/nav.yaml")));
    }

    #[test]
    fn test_missing_script_is_validation_fault() {
        let config = Config {
            testing_instructions: vec![TestingInstruction::new(
                "find login",
                InstructionPriority::High,
                1,
                "login button located",
                "document issue",
            )],
            ..Config::default()
        };
        let err = script_path(&args("config.yaml", None), &config).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_no_instructions_needs_no_script() {
        let path = script_path(&args("config.yaml", None), &Config::default()).unwrap();
        assert_eq!(path, None);
    }
}
