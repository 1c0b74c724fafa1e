//! Testing instruction domain model.
//!
//! An instruction is one unit of testing work: a task for the persona to
//! attempt, how urgent it is, how many attempts it may take, what success
//! looks like, and the documented mitigation when every attempt fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a testing instruction.
///
/// Execution order is `High`, then `Medium`, then `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstructionPriority {
    High,
    Medium,
    Low,
}

impl InstructionPriority {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Execution rank; lower runs first.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl fmt::Display for InstructionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for InstructionPriority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
            .ok_or_else(|| format!("invalid priority '{value}', expected high, medium or low"))
    }
}

impl From<InstructionPriority> for String {
    fn from(priority: InstructionPriority) -> Self {
        priority.as_str().to_string()
    }
}

/// A single testing instruction. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingInstruction {
    /// What the persona should try to do
    pub task: String,
    /// Execution priority
    pub priority: InstructionPriority,
    /// Retry budget, including the first attempt
    pub max_attempts: u32,
    /// Description of a successful outcome
    pub success_criteria: String,
    /// Mitigation recorded when the budget is exhausted
    pub fallback_action: String,
}

impl TestingInstruction {
    pub fn new(
        task: impl Into<String>,
        priority: InstructionPriority,
        max_attempts: u32,
        success_criteria: impl Into<String>,
        fallback_action: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            priority,
            max_attempts,
            success_criteria: success_criteria.into(),
            fallback_action: fallback_action.into(),
        }
    }

    /// Check the structural requirements on a loaded instruction.
    pub fn validate(&self) -> Result<(), String> {
        if self.task.trim().is_empty() {
            return Err("task cannot be empty".to_string());
        }
        if self.max_attempts == 0 {
            return Err(format!("max_attempts for '{}' must be at least 1", self.task));
        }
        if self.success_criteria.trim().is_empty() {
            return Err(format!("success_criteria for '{}' cannot be empty", self.task));
        }
        if self.fallback_action.trim().is_empty() {
            return Err(format!("fallback_action for '{}' cannot be empty", self.task));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parsing_is_case_insensitive() {
        assert_eq!(InstructionPriority::from_str("HIGH"), Some(InstructionPriority::High));
        assert_eq!(InstructionPriority::from_str(" Medium "), Some(InstructionPriority::Medium));
        assert_eq!(InstructionPriority::from_str("urgent"), None);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(InstructionPriority::High.rank() < InstructionPriority::Medium.rank());
        assert!(InstructionPriority::Medium.rank() < InstructionPriority::Low.rank());
    }

    #[test]
    fn test_instruction_yaml() {
        let yaml = r#"
task: "find login"
priority: High
max_attempts: 2
success_criteria: "login button located"
fallback_action: "document issue"
"#;
        let instruction: TestingInstruction = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(instruction.priority, InstructionPriority::High);
        assert_eq!(instruction.max_attempts, 2);
        assert!(instruction.validate().is_ok());

        let bad = yaml.replace("High", "someday");
        assert!(serde_yaml::from_str::<TestingInstruction>(&bad).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let instruction = TestingInstruction::new(
            "find login",
            InstructionPriority::Low,
            0,
            "login button located",
            "document issue",
        );
        let err = instruction.validate().unwrap_err();
        assert!(err.contains("max_attempts"));
    }

    #[test]
    fn test_validate_rejects_blank_task() {
        let instruction =
            TestingInstruction::new("  ", InstructionPriority::Low, 1, "done", "note it");
        assert_eq!(instruction.validate().unwrap_err(), "task cannot be empty");
    }
}
