//! Interview transcript produced by the interview capability.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn interviewer(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Interviewer,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// Ordered dialogue between interviewer and simulated user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewTranscript(Vec<TranscriptEntry>);

impl InterviewTranscript {
    pub const fn new(entries: Vec<TranscriptEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.0
    }

    /// Everything the user said, in order.
    pub fn user_utterances(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|e| e.speaker == Speaker::User)
            .map(|e| e.text.as_str())
    }
}

/// Interview response: the transcript plus the user's satisfaction (1-10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewResult {
    pub transcript: InterviewTranscript,
    pub satisfaction_score: u8,
}

impl InterviewResult {
    pub fn contract_violation(&self) -> Option<String> {
        if !(1..=10).contains(&self.satisfaction_score) {
            return Some(format!(
                "satisfaction score {} is outside 1..=10",
                self.satisfaction_score
            ));
        }
        self.transcript
            .entries()
            .iter()
            .position(|e| e.text.trim().is_empty())
            .map(|i| format!("transcript entry {i} is empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_utterances_in_order() {
        let transcript = InterviewTranscript::new(vec![
            TranscriptEntry::interviewer("How was it?"),
            TranscriptEntry::user("Fine."),
            TranscriptEntry::interviewer("Anything else?"),
            TranscriptEntry::user("The menu was confusing."),
        ]);
        let said: Vec<_> = transcript.user_utterances().collect();
        assert_eq!(said, vec!["Fine.", "The menu was confusing."]);
    }

    #[test]
    fn test_contract_violation() {
        let ok = InterviewResult {
            transcript: InterviewTranscript::default(),
            satisfaction_score: 7,
        };
        assert!(ok.contract_violation().is_none());

        let out_of_range = InterviewResult {
            satisfaction_score: 0,
            ..ok.clone()
        };
        assert!(out_of_range.contract_violation().is_some());

        let blank = InterviewResult {
            transcript: InterviewTranscript::new(vec![TranscriptEntry::user(" ")]),
            satisfaction_score: 7,
        };
        assert_eq!(blank.contract_violation().unwrap(), "transcript entry 0 is empty");
    }
}
