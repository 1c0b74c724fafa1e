//! Attempt results and instruction outcomes.

use serde::{Deserialize, Serialize};

use super::instruction::TestingInstruction;
use super::navigation::NavigationEvent;

/// Result of one attempt at an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub attempt_number: u32,
    pub succeeded: bool,
    pub raw_events: Vec<NavigationEvent>,
    pub judged_reason: String,
}

/// Terminal state of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// An attempt met the success criteria
    Succeeded,
    /// Every attempt failed; the fallback action was recorded
    FallbackInvoked,
    /// The run deadline passed before the instruction started
    Skipped,
}

impl OutcomeStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::FallbackInvoked => "fallback_invoked",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of driving one instruction to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionOutcome {
    pub instruction: TestingInstruction,
    pub attempts_used: u32,
    pub final_status: OutcomeStatus,
    pub fallback_note: Option<String>,
    /// Events from every attempt, in the order they were observed
    pub events: Vec<NavigationEvent>,
    /// The final attempt, if any attempt ran
    pub last_attempt: Option<AttemptResult>,
}

impl InstructionOutcome {
    pub fn succeeded(
        instruction: TestingInstruction,
        events: Vec<NavigationEvent>,
        last_attempt: AttemptResult,
    ) -> Self {
        Self {
            instruction,
            attempts_used: last_attempt.attempt_number,
            final_status: OutcomeStatus::Succeeded,
            fallback_note: None,
            events,
            last_attempt: Some(last_attempt),
        }
    }

    pub fn fallback(
        instruction: TestingInstruction,
        events: Vec<NavigationEvent>,
        last_attempt: AttemptResult,
    ) -> Self {
        let fallback_note = Some(instruction.fallback_action.clone());
        Self {
            instruction,
            attempts_used: last_attempt.attempt_number,
            final_status: OutcomeStatus::FallbackInvoked,
            fallback_note,
            events,
            last_attempt: Some(last_attempt),
        }
    }

    pub const fn skipped(instruction: TestingInstruction) -> Self {
        Self {
            instruction,
            attempts_used: 0,
            final_status: OutcomeStatus::Skipped,
            fallback_note: None,
            events: Vec::new(),
            last_attempt: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.final_status == OutcomeStatus::FallbackInvoked
    }

    pub fn last_judged_reason(&self) -> Option<&str> {
        self.last_attempt.as_ref().map(|a| a.judged_reason.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::InstructionPriority;

    fn instruction() -> TestingInstruction {
        TestingInstruction::new(
            "find login",
            InstructionPriority::High,
            2,
            "login button located",
            "document issue",
        )
    }

    fn attempt(n: u32, succeeded: bool) -> AttemptResult {
        AttemptResult {
            attempt_number: n,
            succeeded,
            raw_events: vec![],
            judged_reason: "reason".to_string(),
        }
    }

    #[test]
    fn test_fallback_copies_action_verbatim() {
        let outcome = InstructionOutcome::fallback(instruction(), vec![], attempt(2, false));
        assert_eq!(outcome.attempts_used, 2);
        assert_eq!(outcome.final_status, OutcomeStatus::FallbackInvoked);
        assert_eq!(outcome.fallback_note.as_deref(), Some("document issue"));
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_skipped_has_no_attempts() {
        let outcome = InstructionOutcome::skipped(instruction());
        assert_eq!(outcome.attempts_used, 0);
        assert!(outcome.last_judged_reason().is_none());
        assert_eq!(outcome.final_status.to_string(), "skipped");
    }
}
