//! Judge that matches success-criteria keywords against the outcome text.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::errors::CapabilityError;
use crate::domain::models::{JudgeConfig, Verdict};
use crate::domain::ports::Judge;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "was", "were", "are", "has", "have", "that", "this", "from",
    "into", "its", "can", "been", "be", "is", "to", "of", "in", "on", "an", "a", "or", "by",
];

const FAILURE_PHRASES: &[&str] = &[
    "not found",
    "could not",
    "couldn't",
    "unable to",
    "failed",
    "did not",
    "didn't",
    "gave up",
];

/// Distinct keywords in first-seen order.
fn keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.len() > 1 && !STOP_WORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Satisfied when enough of the criteria keywords occur in the outcome
/// description and the description reports no failure.
#[derive(Debug, Clone, Copy)]
pub struct KeywordJudge {
    min_coverage: f64,
}

impl Default for KeywordJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordJudge {
    pub const DEFAULT_MIN_COVERAGE: f64 = 0.75;

    pub const fn new() -> Self {
        Self {
            min_coverage: Self::DEFAULT_MIN_COVERAGE,
        }
    }

    /// Coverage is clamped into `[0, 1]`.
    pub fn with_min_coverage(min_coverage: f64) -> Self {
        Self {
            min_coverage: if min_coverage.is_nan() {
                Self::DEFAULT_MIN_COVERAGE
            } else {
                min_coverage.clamp(0.0, 1.0)
            },
        }
    }

    pub fn evaluate(&self, outcome_description: &str, success_criteria: &str) -> Verdict {
        let description = outcome_description.to_lowercase().replace('\u{2019}', "'");

        if let Some(phrase) = FAILURE_PHRASES.iter().find(|p| description.contains(*p)) {
            return Verdict::unsatisfied(format!("outcome reports a failure ('{phrase}')"));
        }

        let expected = keywords(success_criteria);
        if expected.is_empty() {
            return Verdict::satisfied("criteria have no keywords and no failure was reported");
        }

        let present = keywords(&description);
        let missing: Vec<&str> = expected
            .iter()
            .filter(|k| !present.contains(k))
            .map(String::as_str)
            .collect();
        let coverage = (expected.len() - missing.len()) as f64 / expected.len() as f64;

        if coverage >= self.min_coverage {
            Verdict::satisfied(format!(
                "{:.0}% of criteria keywords present",
                coverage * 100.0
            ))
        } else {
            Verdict::unsatisfied(format!("missing keywords: {}", missing.join(", ")))
        }
    }
}

impl From<&JudgeConfig> for KeywordJudge {
    fn from(config: &JudgeConfig) -> Self {
        Self::with_min_coverage(config.min_coverage)
    }
}

#[async_trait]
impl Judge for KeywordJudge {
    fn name(&self) -> &'static str {
        "keyword-judge"
    }

    async fn judge(
        &self,
        outcome_description: &str,
        success_criteria: &str,
    ) -> Result<Verdict, CapabilityError> {
        Ok(self.evaluate(outcome_description, success_criteria))
    }
}
