//! Derives performance, usability and overall health scores from session metrics.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DerivedScores, ScoringPolicy, SessionMetrics};

/// Service for deriving normalized scores from session metrics
///
/// - performance: 1.0 up to the load-time threshold, linear down to 0.0 at the ceiling
/// - usability: 1 - (bounce_weight * bounce + error_weight * error), weights normalized
/// - overall: performance_weight * performance + (1 - performance_weight) * usability
///
/// Every function here is pure.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    policy: ScoringPolicy,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCalculator {
    /// Create a calculator with the default policy
    pub fn new() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    /// Create a calculator with a custom policy
    pub fn with_policy(policy: ScoringPolicy) -> DomainResult<Self> {
        Self::validate_policy(&policy)?;
        Ok(Self { policy })
    }

    /// Reject policies that would break the score invariants.
    pub fn validate_policy(policy: &ScoringPolicy) -> DomainResult<()> {
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !finite_non_negative(policy.load_time_threshold_secs) {
            return Err(DomainError::ValidationFault(format!(
                "scoring.load_time_threshold_secs must be non-negative, got {}",
                policy.load_time_threshold_secs
            )));
        }
        if !policy.load_time_ceiling_secs.is_finite()
            || policy.load_time_ceiling_secs <= policy.load_time_threshold_secs
        {
            return Err(DomainError::ValidationFault(format!(
                "scoring.load_time_ceiling_secs ({}) must exceed load_time_threshold_secs ({})",
                policy.load_time_ceiling_secs, policy.load_time_threshold_secs
            )));
        }
        if !finite_non_negative(policy.bounce_weight)
            || !finite_non_negative(policy.error_weight)
            || policy.bounce_weight + policy.error_weight <= 0.0
        {
            return Err(DomainError::ValidationFault(
                "scoring.bounce_weight and scoring.error_weight must be non-negative and not both zero"
                    .to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&policy.performance_weight) {
            return Err(DomainError::ValidationFault(format!(
                "scoring.performance_weight must be within [0, 1], got {}",
                policy.performance_weight
            )));
        }
        Ok(())
    }

    /// Compute all three scores for a session
    pub fn compute(&self, metrics: &SessionMetrics) -> DerivedScores {
        let performance_score = self.performance_score(metrics.page_load_time_seconds);
        let usability_score =
            self.usability_score(metrics.bounce_rate_fraction, metrics.error_rate_fraction);
        let overall_health_score = self.overall_score(performance_score, usability_score);

        DerivedScores {
            performance_score,
            usability_score,
            overall_health_score,
        }
    }

    /// Performance from page load time; non-increasing in load time
    pub fn performance_score(&self, load_time_seconds: f64) -> f64 {
        let load = non_negative(load_time_seconds);
        let threshold = self.policy.load_time_threshold_secs;
        let ceiling = self.policy.load_time_ceiling_secs;

        if load <= threshold {
            return 1.0;
        }
        if load >= ceiling {
            return 0.0;
        }
        unit(1.0 - (load - threshold) / (ceiling - threshold))
    }

    /// Usability from bounce and error rates; non-increasing in both
    pub fn usability_score(&self, bounce_rate: f64, error_rate: f64) -> f64 {
        let total = self.policy.bounce_weight + self.policy.error_weight;
        let penalty = (self.policy.bounce_weight * unit(bounce_rate)
            + self.policy.error_weight * unit(error_rate))
            / total;
        unit(1.0 - penalty)
    }

    /// Convex combination, so the result lies between its inputs
    pub fn overall_score(&self, performance: f64, usability: f64) -> f64 {
        let (performance, usability) = (unit(performance), unit(usability));
        let w = self.policy.performance_weight;
        let combined = w.mul_add(performance, (1.0 - w) * usability);
        combined.clamp(performance.min(usability), performance.max(usability))
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp below at 0, mapping NaN to 0.
fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ScoreLabel;

    fn metrics(load: f64, bounce: f64, error: f64) -> SessionMetrics {
        SessionMetrics {
            page_load_time_seconds: load,
            interactions_count: 10,
            avg_time_on_page_seconds: 12.0,
            bounce_rate_fraction: bounce,
            error_rate_fraction: error,
        }
    }

    #[test]
    fn test_fast_load_is_excellent() {
        let calc = ScoreCalculator::new();
        let scores = calc.compute(&metrics(1.5, 0.0, 0.0));
        assert!((scores.performance_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(scores.performance_label(), ScoreLabel::Excellent);
    }

    #[test]
    fn test_performance_linear_between_threshold_and_ceiling() {
        let calc = ScoreCalculator::new();
        assert!((calc.performance_score(2.0) - 1.0).abs() < f64::EPSILON);
        // halfway between 2s and 10s
        assert!((calc.performance_score(6.0) - 0.5).abs() < 1e-9);
        assert!(calc.performance_score(10.0).abs() < f64::EPSILON);
        assert!(calc.performance_score(45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_usability_penalizes_bounce_and_errors() {
        let calc = ScoreCalculator::new();
        assert!((calc.usability_score(0.0, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!(calc.usability_score(1.0, 1.0).abs() < f64::EPSILON);
        // 1 - (0.4 * 0.5 + 0.6 * 0.25) = 0.65
        assert!((calc.usability_score(0.5, 0.25) - 0.65).abs() < 1e-9);
        assert!(calc.usability_score(0.2, 0.1) > calc.usability_score(0.3, 0.1));
        assert!(calc.usability_score(0.2, 0.1) > calc.usability_score(0.2, 0.4));
    }

    #[test]
    fn test_overall_between_components() {
        let calc = ScoreCalculator::new();
        let scores = calc.compute(&metrics(8.0, 0.1, 0.05));
        let lo = scores.performance_score.min(scores.usability_score);
        let hi = scores.performance_score.max(scores.usability_score);
        assert!(scores.overall_health_score >= lo && scores.overall_health_score <= hi);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let calc = ScoreCalculator::new();
        let scores = calc.compute(&metrics(-3.0, 1.7, f64::NAN));
        assert!((scores.performance_score - 1.0).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&scores.usability_score));
    }

    #[test]
    fn test_custom_policy() {
        let policy = ScoringPolicy {
            load_time_threshold_secs: 1.0,
            load_time_ceiling_secs: 3.0,
            bounce_weight: 1.0,
            error_weight: 1.0,
            performance_weight: 1.0,
        };
        let calc = ScoreCalculator::with_policy(policy).unwrap();
        let scores = calc.compute(&metrics(2.0, 0.0, 1.0));
        assert!((scores.performance_score - 0.5).abs() < 1e-9);
        assert!((scores.usability_score - 0.5).abs() < 1e-9);
        assert!((scores.overall_health_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_policies_rejected() {
        let ceiling_below = ScoringPolicy {
            load_time_ceiling_secs: 1.0,
            ..ScoringPolicy::default()
        };
        assert!(ScoreCalculator::with_policy(ceiling_below).is_err());

        let zero_weights = ScoringPolicy {
            bounce_weight: 0.0,
            error_weight: 0.0,
            ..ScoringPolicy::default()
        };
        assert!(ScoreCalculator::with_policy(zero_weights).is_err());

        let heavy = ScoringPolicy {
            performance_weight: 1.5,
            ..ScoringPolicy::default()
        };
        let err = ScoreCalculator::with_policy(heavy).unwrap_err();
        assert!(err.is_validation());
    }
}
