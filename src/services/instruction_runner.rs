//! Drives one testing instruction through its bounded attempt loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{AttemptFailure, DomainError, DomainResult};
use crate::domain::models::{
    AttemptResult, EngineConfig, InstructionOutcome, NavigationEvent, PersonaProfile,
    TestingInstruction,
};
use crate::domain::ports::{Judge, Navigator};

/// Runs a single instruction: navigate, judge, retry up to `max_attempts`,
/// then record the fallback.
pub struct InstructionRunner {
    navigator: Arc<dyn Navigator>,
    judge: Arc<dyn Judge>,
    attempt_timeout: Duration,
    attempt_delay: Duration,
}

/// What one attempt produced, before it is folded into the outcome.
struct AttemptReport {
    events: Vec<NavigationEvent>,
    verdict: Result<String, AttemptFailure>,
}

impl InstructionRunner {
    pub fn new(navigator: Arc<dyn Navigator>, judge: Arc<dyn Judge>) -> Self {
        Self::with_engine_config(navigator, judge, &EngineConfig::default())
    }

    pub fn with_engine_config(
        navigator: Arc<dyn Navigator>,
        judge: Arc<dyn Judge>,
        engine: &EngineConfig,
    ) -> Self {
        Self {
            navigator,
            judge,
            attempt_timeout: engine.attempt_timeout(),
            attempt_delay: engine.attempt_delay(),
        }
    }

    /// Execute the instruction until an attempt satisfies its success criteria
    /// or `max_attempts` attempts have been spent.
    ///
    /// Transient capability failures and timeouts consume an attempt. A
    /// malformed capability response aborts with
    /// [`DomainError::CollaboratorContractFault`].
    #[instrument(skip(self, instruction, persona), fields(task = %instruction.task, priority = %instruction.priority))]
    pub async fn run(
        &self,
        instruction: &TestingInstruction,
        persona: &PersonaProfile,
    ) -> DomainResult<InstructionOutcome> {
        instruction.validate().map_err(DomainError::ValidationFault)?;

        let mut all_events = Vec::new();
        let mut attempt_number = 0;

        loop {
            attempt_number += 1;
            if attempt_number > 1 && !self.attempt_delay.is_zero() {
                tokio::time::sleep(self.attempt_delay).await;
            }

            debug!(attempt = attempt_number, max_attempts = instruction.max_attempts, "Starting attempt");
            let report = self.attempt(instruction, persona).await?;
            all_events.extend(report.events.iter().cloned());

            match report.verdict {
                Ok(reason) => {
                    info!(attempt = attempt_number, "Instruction succeeded");
                    let attempt = AttemptResult {
                        attempt_number,
                        succeeded: true,
                        raw_events: report.events,
                        judged_reason: reason,
                    };
                    return Ok(InstructionOutcome::succeeded(instruction.clone(), all_events, attempt));
                }
                Err(failure) => {
                    let attempt = AttemptResult {
                        attempt_number,
                        succeeded: false,
                        raw_events: report.events,
                        judged_reason: failure.to_string(),
                    };

                    if attempt_number >= instruction.max_attempts {
                        warn!(
                            attempts = attempt_number,
                            last_error = %failure,
                            "All attempts failed, invoking fallback"
                        );
                        return Ok(InstructionOutcome::fallback(instruction.clone(), all_events, attempt));
                    }

                    debug!(attempt = attempt_number, error = %failure, "Attempt failed, retrying");
                }
            }
        }
    }

    async fn attempt(
        &self,
        instruction: &TestingInstruction,
        persona: &PersonaProfile,
    ) -> DomainResult<AttemptReport> {
        let navigator = self.navigator.name();

        let report = match timeout(self.attempt_timeout, self.navigator.navigate(&instruction.task, persona)).await {
            Ok(Ok(report)) => report,
            Ok(Err(err)) => {
                let reason = err.into_contract_fault(navigator)?;
                return Ok(AttemptReport {
                    events: Vec::new(),
                    verdict: Err(AttemptFailure::NavigationUnavailable(reason)),
                });
            }
            Err(_) => {
                return Ok(AttemptReport {
                    events: Vec::new(),
                    verdict: Err(self.timed_out("navigation")),
                });
            }
        };

        if let Some(reason) = report.contract_violation() {
            return Err(DomainError::contract(navigator, reason));
        }

        let judge = self.judge.name();
        let verdict = match timeout(
            self.attempt_timeout,
            self.judge.judge(&report.outcome_description, &instruction.success_criteria),
        )
        .await
        {
            Ok(Ok(verdict)) => {
                if let Some(reason) = verdict.contract_violation() {
                    return Err(DomainError::contract(judge, reason));
                }
                if verdict.satisfied {
                    Ok(verdict.reason)
                } else {
                    Err(AttemptFailure::NotSatisfied(verdict.reason))
                }
            }
            Ok(Err(err)) => Err(AttemptFailure::JudgmentUnavailable(err.into_contract_fault(judge)?)),
            Err(_) => Err(self.timed_out("judgment")),
        };

        Ok(AttemptReport {
            events: report.events,
            verdict,
        })
    }

    fn timed_out(&self, capability: &str) -> AttemptFailure {
        AttemptFailure::TimedOut {
            capability: capability.to_string(),
            millis: self.attempt_timeout.as_millis(),
        }
    }
}
