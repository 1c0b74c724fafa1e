//! Interviewer that derives a post-session interview from the outcomes.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;
use crate::domain::models::{
    InstructionOutcome, InterviewResult, InterviewTranscript, NavigationEvent, OutcomeStatus,
    PersonaProfile, TranscriptEntry,
};
use crate::domain::ports::Interviewer;

/// Satisfaction reported when no instruction was executed.
const NEUTRAL_SATISFACTION: u8 = 5;

/// Rule-based interviewer.
///
/// Asks an opening question, one question per executed instruction and a
/// closing question. Satisfaction is `1 + round(9 * success ratio)` over the
/// executed instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInterviewer;

impl RuleBasedInterviewer {
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn satisfaction(outcomes: &[InstructionOutcome]) -> u8 {
        let executed = outcomes
            .iter()
            .filter(|o| o.final_status != OutcomeStatus::Skipped)
            .count();
        if executed == 0 {
            return NEUTRAL_SATISFACTION;
        }
        let succeeded = outcomes
            .iter()
            .filter(|o| o.final_status == OutcomeStatus::Succeeded)
            .count();
        let ratio = succeeded as f64 / executed as f64;
        // ratio is within [0, 1], so this stays within 1..=10
        1 + (9.0 * ratio).round() as u8
    }

    fn opening_answer(outcomes: &[InstructionOutcome]) -> &'static str {
        match Self::satisfaction(outcomes) {
            _ if outcomes.iter().all(|o| o.final_status == OutcomeStatus::Skipped) => {
                "I didn't really get to try much."
            }
            8..=10 => "Overall it was pleasant and I got most things done.",
            5..=7 => "It was okay, but a few things were harder than they needed to be.",
            _ => "Honestly it was frustrating, I couldn't finish most of what I set out to do.",
        }
    }

    fn answer(outcome: &InstructionOutcome) -> String {
        let task = &outcome.instruction.task;
        let mut answer = match (outcome.final_status, outcome.attempts_used) {
            (OutcomeStatus::Succeeded, 1) => format!("That went smoothly, I managed to {task} on the first try."),
            (OutcomeStatus::Succeeded, n) => {
                format!("I got there in the end, but it took me {n} tries to {task}.")
            }
            (_, n) => format!("I couldn't {task} even after {n} attempts."),
        };

        let first_error = outcome.events.iter().find_map(|event| match event {
            NavigationEvent::Error { message } => Some(message.as_str()),
            _ => None,
        });
        if let Some(message) = first_error {
            answer.push_str(&format!(" At one point I saw an error: {message}."));
        }
        answer
    }

    fn closing_answer(outcomes: &[InstructionOutcome], persona: &PersonaProfile) -> String {
        let persona_type = persona.persona_type.replace('_', " ");
        let article = article(&persona_type);
        outcomes.iter().find(|o| o.is_fallback()).map_or_else(
            || format!("As {article} {persona_type} user I wouldn't change much, it did what I needed."),
            |o| {
                format!(
                    "As {article} {persona_type} user, it would help if it were easier to {}.",
                    o.instruction.task
                )
            },
        )
    }
}

fn article(word: &str) -> &'static str {
    match word.trim_start().chars().next() {
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => "an",
        _ => "a",
    }
}

#[async_trait]
impl Interviewer for RuleBasedInterviewer {
    fn name(&self) -> &'static str {
        "rule-based-interviewer"
    }

    async fn interview(
        &self,
        outcomes: &[InstructionOutcome],
        persona: &PersonaProfile,
    ) -> Result<InterviewResult, CapabilityError> {
        let mut entries = vec![
            TranscriptEntry::interviewer("Thanks for taking part. How would you describe your overall experience?"),
            TranscriptEntry::user(Self::opening_answer(outcomes)),
        ];

        for outcome in outcomes.iter().filter(|o| o.final_status != OutcomeStatus::Skipped) {
            entries.push(TranscriptEntry::interviewer(format!(
                "You tried to {}. How did that go?",
                outcome.instruction.task
            )));
            entries.push(TranscriptEntry::user(Self::answer(outcome)));
        }

        entries.push(TranscriptEntry::interviewer("What one thing would you change?"));
        entries.push(TranscriptEntry::user(Self::closing_answer(outcomes, persona)));

        Ok(InterviewResult {
            transcript: InterviewTranscript::new(entries),
            satisfaction_score: Self::satisfaction(outcomes),
        })
    }
}
