//! Session metrics and the scores derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw measurements collected across a whole session.
///
/// Fractions lie in `[0, 1]` and durations are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub page_load_time_seconds: f64,
    pub interactions_count: u32,
    pub avg_time_on_page_seconds: f64,
    pub bounce_rate_fraction: f64,
    pub error_rate_fraction: f64,
}

impl SessionMetrics {
    /// Whether every field satisfies its range invariant.
    pub fn is_valid(&self) -> bool {
        let duration = |v: f64| v.is_finite() && v >= 0.0;
        let fraction = |v: f64| (0.0..=1.0).contains(&v);
        duration(self.page_load_time_seconds)
            && duration(self.avg_time_on_page_seconds)
            && fraction(self.bounce_rate_fraction)
            && fraction(self.error_rate_fraction)
    }
}

/// Qualitative label attached to a score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreLabel {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl ScoreLabel {
    /// Lower bound (inclusive) for `Excellent`.
    pub const EXCELLENT_FROM: f64 = 0.90;
    /// Lower bound (inclusive) for `Good`.
    pub const GOOD_FROM: f64 = 0.75;
    /// Lower bound (inclusive) for `Moderate`.
    pub const MODERATE_FROM: f64 = 0.50;

    /// Map a score to its label. Total over all inputs; anything below
    /// `MODERATE_FROM` (including NaN) is `Poor`.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::EXCELLENT_FROM {
            Self::Excellent
        } else if score >= Self::GOOD_FROM {
            Self::Good
        } else if score >= Self::MODERATE_FROM {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized quality scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedScores {
    pub performance_score: f64,
    pub usability_score: f64,
    pub overall_health_score: f64,
}

impl DerivedScores {
    pub fn performance_label(&self) -> ScoreLabel {
        ScoreLabel::from_score(self.performance_score)
    }

    pub fn usability_label(&self) -> ScoreLabel {
        ScoreLabel::from_score(self.usability_score)
    }

    pub fn overall_label(&self) -> ScoreLabel {
        ScoreLabel::from_score(self.overall_health_score)
    }
}
