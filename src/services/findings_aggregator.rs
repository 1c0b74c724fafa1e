//! Merges outcomes, scores, persona and interview into one findings model.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::models::{
    DerivedScores, FindingsModel, InstructionOutcome, InterviewResult, InterviewTranscript,
    NavigationEvent, PainPoint, PainPointOrigin, PersonaProfile, RunContext, SessionMetrics,
};

/// Lower-case fragments that mark a negative remark.
const NEGATIVE_MARKERS: &[&str] = &[
    "problem",
    "issue",
    "difficult",
    "confusing",
    "confused",
    "error",
    "fail",
    "slow",
    "broken",
    "stuck",
    "frustrat",
    "unclear",
    "couldn't",
    "could not",
    "cannot",
    "can't",
    "unable",
    "hard to",
    "missing",
];

/// Lower-case fragments that mark an improvement suggestion.
const SUGGESTION_MARKERS: &[&str] = &[
    "should",
    "would be nice",
    "would be better",
    "wish",
    "suggest",
    "recommend",
    "could be improved",
    "better if",
    "it would help",
];

fn contains_marker(text: &str, markers: &[&str]) -> bool {
    let normalized = text.to_lowercase().replace('\u{2019}', "'");
    markers.iter().any(|marker| normalized.contains(marker))
}

pub fn is_negative(text: &str) -> bool {
    contains_marker(text, NEGATIVE_MARKERS)
}

pub fn is_suggestion(text: &str) -> bool {
    contains_marker(text, SUGGESTION_MARKERS)
}

/// Builds a [`FindingsModel`].
///
/// Pain points and suggestions are kept in discovery order and deduplicated
/// by exact text; the first occurrence keeps its origin.
#[derive(Debug, Clone)]
pub struct FindingsAggregator {
    context: RunContext,
    max_quotes: usize,
}

#[derive(Default)]
struct Collected {
    pain_points: Vec<PainPoint>,
    suggestions: Vec<String>,
    seen_pain_points: HashSet<String>,
    seen_suggestions: HashSet<String>,
}

impl Collected {
    fn pain_point(&mut self, description: &str, origin: PainPointOrigin, mitigation: Option<String>) {
        if self.seen_pain_points.insert(description.to_string()) {
            self.pain_points.push(PainPoint {
                description: description.to_string(),
                origin,
                mitigation,
            });
        }
    }

    fn suggestion(&mut self, text: &str) {
        if self.seen_suggestions.insert(text.to_string()) {
            self.suggestions.push(text.to_string());
        }
    }
}

impl FindingsAggregator {
    pub const fn new(context: RunContext, max_quotes: usize) -> Self {
        Self { context, max_quotes }
    }

    pub fn merge(
        &self,
        outcomes: Vec<InstructionOutcome>,
        metrics: SessionMetrics,
        scores: DerivedScores,
        persona: PersonaProfile,
        interview: Option<InterviewResult>,
    ) -> FindingsModel {
        let mut collected = Collected::default();

        for outcome in &outcomes {
            Self::scan_outcome(outcome, &mut collected);
        }

        let (transcript, satisfaction_score) = interview.map_or_else(
            || (InterviewTranscript::default(), None),
            |result| (result.transcript, Some(result.satisfaction_score)),
        );

        for utterance in transcript.user_utterances() {
            let utterance = utterance.trim();
            if is_negative(utterance) {
                collected.pain_point(utterance, PainPointOrigin::Interview, None);
            }
            if is_suggestion(utterance) {
                collected.suggestion(utterance);
            }
        }

        let quotes: Vec<String> = transcript
            .user_utterances()
            .take(self.max_quotes)
            .map(|u| u.trim().to_string())
            .collect();

        debug!(
            pain_points = collected.pain_points.len(),
            suggestions = collected.suggestions.len(),
            quotes = quotes.len(),
            "Findings merged"
        );

        FindingsModel {
            context: self.context.clone(),
            persona,
            outcomes,
            metrics,
            scores,
            pain_points: collected.pain_points,
            suggestions: collected.suggestions,
            satisfaction_score,
            quotes,
            transcript,
        }
    }

    fn scan_outcome(outcome: &InstructionOutcome, collected: &mut Collected) {
        let instruction = &outcome.instruction;
        let origin = |fallback: bool| PainPointOrigin::Instruction {
            task: instruction.task.clone(),
            priority: instruction.priority,
            fallback,
        };

        for event in &outcome.events {
            match event {
                NavigationEvent::Error { message } => {
                    collected.pain_point(message.trim(), origin(false), None);
                }
                NavigationEvent::Observation { note } => {
                    let note = note.trim();
                    if is_negative(note) {
                        collected.pain_point(note, origin(false), None);
                    }
                    if is_suggestion(note) {
                        collected.suggestion(note);
                    }
                }
                NavigationEvent::PageLoad { .. } | NavigationEvent::Interaction { .. } => {}
            }
        }

        if let Some(note) = outcome.fallback_note.as_deref().filter(|_| outcome.is_fallback()) {
            let description = format!("{}: {}", instruction.task, note);
            collected.pain_point(&description, origin(true), Some(note.to_string()));
        }
    }
}
