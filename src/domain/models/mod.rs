//! Domain models for the critique engine.

pub mod config;
pub mod findings;
pub mod instruction;
pub mod interview;
pub mod metrics;
pub mod navigation;
pub mod outcome;
pub mod persona;
pub mod report;

pub use config::{
    BenchmarkConfig, Competitor, Config, EngineConfig, JudgeConfig, LoggingConfig, ReportConfig,
    ScoringPolicy,
};
pub use findings::{FindingsModel, PainPoint, PainPointOrigin, RunContext};
pub use instruction::{InstructionPriority, TestingInstruction};
pub use interview::{InterviewResult, InterviewTranscript, Speaker, TranscriptEntry};
pub use metrics::{DerivedScores, ScoreLabel, SessionMetrics};
pub use navigation::{NavigationEvent, NavigationReport, Verdict};
pub use outcome::{AttemptResult, InstructionOutcome, OutcomeStatus};
pub use persona::PersonaProfile;
pub use report::{CritiqueReport, RecommendationTier, ReportBlock, ReportSection, SectionKind};
