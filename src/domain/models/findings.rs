//! Unified findings model merged from outcomes, scores, persona and interview.

use serde::{Deserialize, Serialize};

use super::config::{BenchmarkConfig, Competitor};
use super::instruction::InstructionPriority;
use super::interview::InterviewTranscript;
use super::metrics::{DerivedScores, SessionMetrics};
use super::outcome::InstructionOutcome;
use super::persona::PersonaProfile;

/// Static facts about the run that the report echoes back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunContext {
    pub app_url: String,
    pub benchmark: Option<BenchmarkConfig>,
    pub competitors: Vec<Competitor>,
}

/// Where a pain point was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PainPointOrigin {
    /// Found while executing an instruction
    Instruction {
        task: String,
        priority: InstructionPriority,
        fallback: bool,
    },
    /// Raised by the user during the interview
    Interview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainPoint {
    pub description: String,
    pub origin: PainPointOrigin,
    /// Mitigation recorded for the originating instruction, for fallbacks
    pub mitigation: Option<String>,
}

impl PainPoint {
    /// Priority of the originating instruction, if the pain point has one.
    pub const fn instruction_priority(&self) -> Option<InstructionPriority> {
        match &self.origin {
            PainPointOrigin::Instruction { priority, .. } => Some(*priority),
            PainPointOrigin::Interview => None,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, PainPointOrigin::Instruction { fallback: true, .. })
    }
}

/// Everything the report synthesizer needs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingsModel {
    pub context: RunContext,
    pub persona: PersonaProfile,
    /// Outcomes in execution order
    pub outcomes: Vec<InstructionOutcome>,
    pub metrics: SessionMetrics,
    pub scores: DerivedScores,
    /// Deduplicated, in discovery order
    pub pain_points: Vec<PainPoint>,
    /// Deduplicated, in discovery order
    pub suggestions: Vec<String>,
    pub satisfaction_score: Option<u8>,
    pub quotes: Vec<String>,
    pub transcript: InterviewTranscript,
}
