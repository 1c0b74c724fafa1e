//! Mock capabilities for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::errors::CapabilityError;
use crate::domain::models::{
    InstructionOutcome, InterviewResult, InterviewTranscript, NavigationEvent, NavigationReport,
    OutcomeStatus, PersonaProfile, TranscriptEntry, Verdict,
};
use crate::domain::ports::{Interviewer, Judge, Navigator, PersonaResearcher};

/// Scripted navigation response.
#[derive(Debug, Clone)]
pub enum MockNavigation {
    /// Answer with this report
    Report(NavigationReport),
    /// Fail transiently
    Unavailable(String),
    /// Fail with a malformed payload
    Malformed(String),
    /// Sleep this long, then fail transiently
    Hang(Duration),
}

impl MockNavigation {
    pub fn report(events: Vec<NavigationEvent>, outcome: impl Into<String>) -> Self {
        Self::Report(NavigationReport::new(events, outcome))
    }

    pub fn unavailable() -> Self {
        Self::Unavailable("no response from navigator".to_string())
    }
}

/// Mock navigator answering from per-task scripts.
///
/// Each call consumes the next scripted response for the task; once a script
/// runs dry the default response is used.
pub struct MockNavigator {
    scripts: Mutex<HashMap<String, VecDeque<MockNavigation>>>,
    default_response: MockNavigation,
    calls: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::with_default_response(MockNavigation::unavailable())
    }

    pub fn with_default_response(response: MockNavigation) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            default_response: response,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the responses for one task, in order.
    #[must_use]
    pub fn with_script(mut self, task: impl Into<String>, responses: Vec<MockNavigation>) -> Self {
        self.scripts
            .get_mut()
            .insert(task.into(), responses.into_iter().collect());
        self
    }

    /// Tasks navigated so far, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn next_response(&self, task: &str) -> MockNavigation {
        let mut scripts = self.scripts.lock().await;
        scripts
            .get_mut(task)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Default for MockNavigator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Navigator for MockNavigator {
    fn name(&self) -> &'static str {
        "mock-navigator"
    }

    async fn navigate(
        &self,
        task: &str,
        _persona: &PersonaProfile,
    ) -> Result<NavigationReport, CapabilityError> {
        self.calls.lock().await.push(task.to_string());

        match self.next_response(task).await {
            MockNavigation::Report(report) => Ok(report),
            MockNavigation::Unavailable(reason) => Err(CapabilityError::Transient(reason)),
            MockNavigation::Malformed(reason) => Err(CapabilityError::Malformed(reason)),
            MockNavigation::Hang(duration) => {
                tokio::time::sleep(duration).await;
                Err(CapabilityError::Transient("navigator hung".to_string()))
            }
        }
    }
}

/// Mock judge.
///
/// Scripted verdicts are consumed first; afterwards the judge is satisfied
/// when the outcome description contains the success criteria
/// (case-insensitive).
pub struct MockJudge {
    scripted: Mutex<VecDeque<Result<Verdict, CapabilityError>>>,
}

impl MockJudge {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_verdicts(verdicts: Vec<Result<Verdict, CapabilityError>>) -> Self {
        Self {
            scripted: Mutex::new(verdicts.into_iter().collect()),
        }
    }
}

impl Default for MockJudge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Judge for MockJudge {
    fn name(&self) -> &'static str {
        "mock-judge"
    }

    async fn judge(
        &self,
        outcome_description: &str,
        success_criteria: &str,
    ) -> Result<Verdict, CapabilityError> {
        if let Some(scripted) = self.scripted.lock().await.pop_front() {
            return scripted;
        }

        let satisfied = outcome_description
            .to_lowercase()
            .contains(&success_criteria.to_lowercase());
        Ok(if satisfied {
            Verdict::satisfied(format!("outcome mentions '{success_criteria}'"))
        } else {
            Verdict::unsatisfied(format!("outcome does not mention '{success_criteria}'"))
        })
    }
}

/// Mock persona researcher returning a fixed response.
pub struct MockPersonaResearcher {
    response: Option<Result<PersonaProfile, CapabilityError>>,
}

impl MockPersonaResearcher {
    /// Builds a simple profile from the requested type.
    pub const fn new() -> Self {
        Self { response: None }
    }

    pub const fn with_response(response: Result<PersonaProfile, CapabilityError>) -> Self {
        Self {
            response: Some(response),
        }
    }
}

impl Default for MockPersonaResearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonaResearcher for MockPersonaResearcher {
    fn name(&self) -> &'static str {
        "mock-persona-researcher"
    }

    async fn research(&self, persona_type: &str) -> Result<PersonaProfile, CapabilityError> {
        match &self.response {
            Some(response) => response.clone(),
            None => Ok(PersonaProfile::new(
                persona_type,
                format!("Synthetic {persona_type} used for testing"),
                vec!["methodical".to_string()],
            )),
        }
    }
}

/// Mock interviewer.
///
/// Without a fixed response, the user answers once per outcome: a complaint
/// for fallbacks, praise for successes. Satisfaction is 7.
pub struct MockInterviewer {
    response: Option<Result<InterviewResult, CapabilityError>>,
}

impl MockInterviewer {
    pub const fn new() -> Self {
        Self { response: None }
    }

    pub const fn with_response(response: Result<InterviewResult, CapabilityError>) -> Self {
        Self {
            response: Some(response),
        }
    }
}

impl Default for MockInterviewer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interviewer for MockInterviewer {
    fn name(&self) -> &'static str {
        "mock-interviewer"
    }

    async fn interview(
        &self,
        outcomes: &[InstructionOutcome],
        _persona: &PersonaProfile,
    ) -> Result<InterviewResult, CapabilityError> {
        if let Some(response) = &self.response {
            return response.clone();
        }

        let mut entries = Vec::new();
        for outcome in outcomes {
            let task = &outcome.instruction.task;
            entries.push(TranscriptEntry::interviewer(format!("How did it go when you tried to {task}?")));
            let answer = match outcome.final_status {
                OutcomeStatus::Succeeded => format!("I managed to {task} quickly."),
                OutcomeStatus::FallbackInvoked => format!("I couldn't {task}, it was frustrating."),
                OutcomeStatus::Skipped => format!("I never got to {task}."),
            };
            entries.push(TranscriptEntry::user(answer));
        }

        Ok(InterviewResult {
            transcript: InterviewTranscript::new(entries),
            satisfaction_score: 7,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> PersonaProfile {
        PersonaProfile::new("novice", "test", vec![])
    }

    #[tokio::test]
    async fn test_navigator_consumes_script_then_default() {
        let navigator = MockNavigator::new().with_script(
            "find login",
            vec![MockNavigation::report(vec![], "login button located")],
        );

        assert!(navigator.navigate("find login", &persona()).await.is_ok());
        let second = navigator.navigate("find login", &persona()).await;
        assert!(matches!(second, Err(CapabilityError::Transient(_))));
        assert_eq!(navigator.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_judge_matches_criteria() {
        let judge = MockJudge::new();
        let verdict = judge.judge("The Login Button Located at top", "login button located").await.unwrap();
        assert!(verdict.satisfied);
        let verdict = judge.judge("nothing here", "login button located").await.unwrap();
        assert!(!verdict.satisfied);
    }

    #[tokio::test]
    async fn test_judge_scripted_first() {
        let judge = MockJudge::with_verdicts(vec![Err(CapabilityError::Transient("busy".into()))]);
        assert!(judge.judge("x", "x").await.is_err());
        assert!(judge.judge("x", "x").await.unwrap().satisfied);
    }
}
