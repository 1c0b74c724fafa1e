pub mod critique_engine;
pub mod findings_aggregator;
pub mod instruction_runner;
pub mod instruction_scheduler;
pub mod metrics_collector;
pub mod report_synthesizer;
pub mod score_calculator;

pub use critique_engine::{Capabilities, CritiqueEngine, CritiqueRun};
pub use findings_aggregator::FindingsAggregator;
pub use instruction_runner::InstructionRunner;
pub use instruction_scheduler::InstructionScheduler;
pub use metrics_collector::MetricsCollector;
pub use report_synthesizer::ReportSynthesizer;
pub use score_calculator::ScoreCalculator;
