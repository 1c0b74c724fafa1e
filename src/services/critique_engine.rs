//! End-to-end critique pipeline.
//!
//! persona research -> instruction scheduling -> metrics -> scores ->
//! interview -> findings -> report. Only [`DomainError`] escapes a run; every
//! recoverable capability failure is folded into the findings instead.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{CapabilityError, DomainError, DomainResult};
use crate::domain::models::{
    Config, CritiqueReport, FindingsModel, InstructionOutcome, InterviewResult, PersonaProfile,
    RunContext,
};
use crate::domain::ports::{Interviewer, Judge, Navigator, PersonaResearcher};

use super::findings_aggregator::FindingsAggregator;
use super::instruction_runner::InstructionRunner;
use super::instruction_scheduler::InstructionScheduler;
use super::metrics_collector::MetricsCollector;
use super::report_synthesizer::ReportSynthesizer;
use super::score_calculator::ScoreCalculator;

/// The four external capabilities a run depends on.
#[derive(Clone)]
pub struct Capabilities {
    pub persona_researcher: Arc<dyn PersonaResearcher>,
    pub navigator: Arc<dyn Navigator>,
    pub judge: Arc<dyn Judge>,
    pub interviewer: Arc<dyn Interviewer>,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct CritiqueRun {
    pub run_id: Uuid,
    pub findings: FindingsModel,
    pub report: CritiqueReport,
}

pub struct CritiqueEngine<'a> {
    config: &'a Config,
    capabilities: Capabilities,
}

impl<'a> CritiqueEngine<'a> {
    pub const fn new(config: &'a Config, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Reject input the pipeline cannot run on. Nothing is called before this
    /// passes.
    pub fn preflight(config: &Config) -> DomainResult<()> {
        if config.app_url.trim().is_empty() {
            return Err(DomainError::ValidationFault("app_url cannot be empty".to_string()));
        }
        if config.persona_type.trim().is_empty() {
            return Err(DomainError::ValidationFault(
                "persona_type cannot be empty".to_string(),
            ));
        }
        for (index, instruction) in config.testing_instructions.iter().enumerate() {
            instruction.validate().map_err(|reason| {
                DomainError::ValidationFault(format!("testing_instructions[{index}]: {reason}"))
            })?;
        }
        ScoreCalculator::validate_policy(&config.scoring)?;
        if config.report.top_pain_points == 0 {
            return Err(DomainError::ValidationFault(
                "report.top_pain_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(app_url = %self.config.app_url, persona = %self.config.persona_type, run_id = tracing::field::Empty))]
    pub async fn run(&self) -> DomainResult<CritiqueRun> {
        Self::preflight(self.config)?;

        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(
            instructions = self.config.testing_instructions.len(),
            "Starting critique run"
        );

        let calculator = ScoreCalculator::with_policy(self.config.scoring)?;
        let persona = self.research_persona().await?;

        let runner = InstructionRunner::with_engine_config(
            self.capabilities.navigator.clone(),
            self.capabilities.judge.clone(),
            &self.config.engine,
        );
        let scheduler =
            InstructionScheduler::new(runner).with_run_timeout(self.config.engine.run_timeout());
        let outcomes = scheduler
            .run(&self.config.testing_instructions, &persona)
            .await?;

        let metrics = MetricsCollector::new().collect(&outcomes);
        let scores = calculator.compute(&metrics);
        info!(
            performance = scores.performance_score,
            usability = scores.usability_score,
            overall = scores.overall_health_score,
            "Scores derived"
        );

        let interview = self.interview(&outcomes, &persona).await?;

        let context = RunContext {
            app_url: self.config.app_url.clone(),
            benchmark: self.config.benchmark,
            competitors: self.config.competitors.clone(),
        };
        let findings = FindingsAggregator::new(context, self.config.report.max_quotes)
            .merge(outcomes, metrics, scores, persona, interview);
        let report = ReportSynthesizer::new(self.config.report.top_pain_points).render(&findings);

        info!(pain_points = findings.pain_points.len(), "Critique run complete");
        Ok(CritiqueRun {
            run_id,
            findings,
            report,
        })
    }

    async fn research_persona(&self) -> DomainResult<PersonaProfile> {
        let researcher = &self.capabilities.persona_researcher;
        let persona_type = &self.config.persona_type;

        match self.call(researcher.research(persona_type)).await {
            Ok(profile) => {
                if let Some(reason) = profile.contract_violation() {
                    return Err(DomainError::contract(researcher.name(), reason));
                }
                Ok(profile)
            }
            Err(err) => {
                let reason = err.into_contract_fault(researcher.name())?;
                warn!(reason = %reason, "Persona research unavailable, continuing with bare profile");
                Ok(PersonaProfile::unresearched(persona_type.as_str()))
            }
        }
    }

    async fn interview(
        &self,
        outcomes: &[InstructionOutcome],
        persona: &PersonaProfile,
    ) -> DomainResult<Option<InterviewResult>> {
        let interviewer = &self.capabilities.interviewer;

        match self.call(interviewer.interview(outcomes, persona)).await {
            Ok(result) => {
                if let Some(reason) = result.contract_violation() {
                    return Err(DomainError::contract(interviewer.name(), reason));
                }
                Ok(Some(result))
            }
            Err(err) => {
                let reason = err.into_contract_fault(interviewer.name())?;
                warn!(reason = %reason, "Interview unavailable, report will omit satisfaction");
                Ok(None)
            }
        }
    }

    /// Await a capability call under the attempt timeout; expiry counts as a
    /// transient failure.
    async fn call<T>(
        &self,
        future: impl Future<Output = Result<T, CapabilityError>> + Send,
    ) -> Result<T, CapabilityError> {
        let limit: Duration = self.config.engine.attempt_timeout();
        timeout(limit, future).await.unwrap_or_else(|_| {
            Err(CapabilityError::Transient(format!(
                "no response within {}ms",
                limit.as_millis()
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::capabilities::mock::{
        MockInterviewer, MockJudge, MockNavigation, MockNavigator, MockPersonaResearcher,
    };
    use crate::domain::models::{
        InstructionPriority, InterviewTranscript, SectionKind, TestingInstruction,
    };

    fn config(instructions: Vec<TestingInstruction>) -> Config {
        Config {
            app_url: "https://shop.example".to_string(),
            persona_type: "novice".to_string(),
            testing_instructions: instructions,
            ..Config::default()
        }
    }

    fn capabilities(
        researcher: MockPersonaResearcher,
        interviewer: MockInterviewer,
    ) -> Capabilities {
        Capabilities {
            persona_researcher: Arc::new(researcher),
            navigator: Arc::new(MockNavigator::with_default_response(MockNavigation::report(
                vec![],
                "nothing found",
            ))),
            judge: Arc::new(MockJudge::new()),
            interviewer: Arc::new(interviewer),
        }
    }

    #[tokio::test]
    async fn test_empty_app_url_is_validation_fault() {
        let mut config = config(vec![]);
        config.app_url = "  ".to_string();
        let engine = CritiqueEngine::new(
            &config,
            capabilities(MockPersonaResearcher::new(), MockInterviewer::new()),
        );
        let err = engine.run().await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_instruction_rejected_before_running() {
        let config = config(vec![TestingInstruction::new(
            "",
            InstructionPriority::High,
            1,
            "done",
            "note",
        )]);
        let err = CritiqueEngine::preflight(&config).unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationFault("testing_instructions[0]: task cannot be empty".to_string())
        );
    }

    #[tokio::test]
    async fn test_transient_research_uses_bare_profile() {
        let config = config(vec![]);
        let engine = CritiqueEngine::new(
            &config,
            capabilities(
                MockPersonaResearcher::with_response(Err(CapabilityError::Transient(
                    "search offline".to_string(),
                ))),
                MockInterviewer::new(),
            ),
        );
        let run = engine.run().await.unwrap();
        assert_eq!(run.findings.persona, PersonaProfile::unresearched("novice"));
    }

    #[tokio::test]
    async fn test_malformed_persona_is_contract_fault() {
        let config = config(vec![]);
        let engine = CritiqueEngine::new(
            &config,
            capabilities(
                MockPersonaResearcher::with_response(Ok(PersonaProfile::new("novice", "", vec![]))),
                MockInterviewer::new(),
            ),
        );
        let err = engine.run().await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::CollaboratorContractFault { ref collaborator, .. } if collaborator == "mock-persona-researcher"
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_satisfaction_is_contract_fault() {
        let config = config(vec![]);
        let engine = CritiqueEngine::new(
            &config,
            capabilities(
                MockPersonaResearcher::new(),
                MockInterviewer::with_response(Ok(InterviewResult {
                    transcript: InterviewTranscript::default(),
                    satisfaction_score: 11,
                })),
            ),
        );
        assert!(engine.run().await.is_err());
    }

    #[tokio::test]
    async fn test_transient_interview_omits_satisfaction() {
        let config = config(vec![]);
        let engine = CritiqueEngine::new(
            &config,
            capabilities(
                MockPersonaResearcher::new(),
                MockInterviewer::with_response(Err(CapabilityError::Transient("busy".to_string()))),
            ),
        );
        let run = engine.run().await.unwrap();
        assert_eq!(run.findings.satisfaction_score, None);
        assert!(run
            .report
            .to_markdown()
            .contains("- **Satisfaction Score:** Not available"));
    }

    #[tokio::test]
    async fn test_full_run_renders_report() {
        let config = config(vec![TestingInstruction::new(
            "find login",
            InstructionPriority::High,
            2,
            "login button located",
            "document issue",
        )]);
        let engine = CritiqueEngine::new(
            &config,
            capabilities(MockPersonaResearcher::new(), MockInterviewer::new()),
        );

        let run = engine.run().await.unwrap();
        assert_eq!(run.findings.outcomes.len(), 1);
        assert_eq!(run.findings.outcomes[0].attempts_used, 2);
        assert_eq!(run.report.sections().len(), SectionKind::ALL.len());
        assert_eq!(run.findings.satisfaction_score, Some(7));
    }
}
