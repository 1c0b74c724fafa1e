//! Sequences testing instructions by priority and collects their outcomes.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{InstructionOutcome, PersonaProfile, TestingInstruction};

use super::instruction_runner::InstructionRunner;

/// Runs instructions strictly one at a time, `high` before `medium` before
/// `low`, keeping input order among equal priorities.
///
/// The scheduler holds no retry logic. It owns the outcome sequence and
/// appends to it only after an instruction has fully resolved.
pub struct InstructionScheduler {
    runner: InstructionRunner,
    run_timeout: Option<Duration>,
}

impl InstructionScheduler {
    pub const fn new(runner: InstructionRunner) -> Self {
        Self {
            runner,
            run_timeout: None,
        }
    }

    /// Stop starting new instructions once `run_timeout` has elapsed.
    #[must_use]
    pub const fn with_run_timeout(mut self, run_timeout: Option<Duration>) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    /// Execution order: stable sort by priority rank.
    pub fn execution_order(instructions: &[TestingInstruction]) -> Vec<&TestingInstruction> {
        let mut ordered: Vec<&TestingInstruction> = instructions.iter().collect();
        ordered.sort_by_key(|instruction| instruction.priority.rank());
        ordered
    }

    /// Run every instruction and return outcomes in execution order.
    ///
    /// The deadline is only checked between instructions; anything not yet
    /// started when it passes is reported as skipped. A timeout too large to
    /// represent as an instant means no deadline.
    #[instrument(skip(self, instructions, persona), fields(instructions = instructions.len()))]
    pub async fn run(
        &self,
        instructions: &[TestingInstruction],
        persona: &PersonaProfile,
    ) -> DomainResult<Vec<InstructionOutcome>> {
        let deadline = self
            .run_timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        let mut outcomes = Vec::with_capacity(instructions.len());

        for instruction in Self::execution_order(instructions) {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(task = %instruction.task, "Run deadline passed, skipping instruction");
                outcomes.push(InstructionOutcome::skipped(instruction.clone()));
                continue;
            }

            let outcome = self.runner.run(instruction, persona).await?;
            outcomes.push(outcome);
        }

        info!(outcomes = outcomes.len(), "All instructions resolved");
        Ok(outcomes)
    }
}
