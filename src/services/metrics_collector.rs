//! Derives raw session metrics from the navigation traces of all outcomes.

use crate::domain::models::{InstructionOutcome, NavigationEvent, SessionMetrics};

/// Collects [`SessionMetrics`] across a whole session.
///
/// Bounces are counted per instruction trace: a page load with no
/// interaction before the next page load (or the end of that instruction's
/// events) is a bounce.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCollector;

#[derive(Debug, Default)]
struct Tally {
    page_loads: u32,
    load_time_total: f64,
    time_on_page_total: f64,
    bounces: u32,
    interactions: u32,
    failed_interactions: u32,
    errors: u32,
}

impl MetricsCollector {
    pub const fn new() -> Self {
        Self
    }

    pub fn collect(&self, outcomes: &[InstructionOutcome]) -> SessionMetrics {
        let mut tally = Tally::default();
        for outcome in outcomes {
            tally.absorb(&outcome.events);
        }
        let metrics = tally.finish();
        debug_assert!(metrics.is_valid(), "metrics out of range: {metrics:?}");
        metrics
    }
}

impl Tally {
    fn absorb(&mut self, events: &[NavigationEvent]) {
        // Whether the most recent page load in this trace is still waiting for an interaction
        let mut open_page = false;

        for event in events {
            match event {
                NavigationEvent::PageLoad {
                    load_time_seconds,
                    time_on_page_seconds,
                    ..
                } => {
                    if open_page {
                        self.bounces += 1;
                    }
                    open_page = true;
                    self.page_loads += 1;
                    self.load_time_total += load_time_seconds.max(0.0);
                    self.time_on_page_total += time_on_page_seconds.max(0.0);
                }
                NavigationEvent::Interaction { succeeded, .. } => {
                    open_page = false;
                    self.interactions += 1;
                    if !succeeded {
                        self.failed_interactions += 1;
                    }
                }
                NavigationEvent::Error { .. } => self.errors += 1,
                NavigationEvent::Observation { .. } => {}
            }
        }

        if open_page {
            self.bounces += 1;
        }
    }

    fn finish(self) -> SessionMetrics {
        let ratio = |num: f64, den: f64| if den > 0.0 { (num / den).clamp(0.0, 1.0) } else { 0.0 };
        let loads = f64::from(self.page_loads);

        SessionMetrics {
            page_load_time_seconds: mean(self.load_time_total, self.page_loads),
            interactions_count: self.interactions,
            avg_time_on_page_seconds: mean(self.time_on_page_total, self.page_loads),
            bounce_rate_fraction: ratio(f64::from(self.bounces), loads),
            error_rate_fraction: ratio(
                f64::from(self.errors + self.failed_interactions),
                f64::from(self.interactions + self.errors),
            ),
        }
    }
}

fn mean(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AttemptResult, InstructionPriority, NavigationEvent as E, TestingInstruction,
    };

    fn outcome(events: Vec<E>) -> InstructionOutcome {
        let instruction =
            TestingInstruction::new("task", InstructionPriority::Medium, 1, "done", "note");
        let attempt = AttemptResult {
            attempt_number: 1,
            succeeded: true,
            raw_events: events.clone(),
            judged_reason: "ok".to_string(),
        };
        InstructionOutcome::succeeded(instruction, events, attempt)
    }

    #[test]
    fn test_empty_session_is_all_zero() {
        let metrics = MetricsCollector::new().collect(&[]);
        assert_eq!(metrics, SessionMetrics::default());
    }

    #[test]
    fn test_collects_means_and_rates() {
        let outcomes = vec![
            outcome(vec![
                E::page_load("/", 1.0, 10.0),
                E::interaction("click", "#signup", true),
                E::page_load("/signup", 3.0, 20.0),
                E::interaction("type", "#email", false),
            ]),
            outcome(vec![
                E::page_load("/pricing", 2.0, 3.0),
                E::error("500 from /api/plans"),
            ]),
        ];

        let metrics = MetricsCollector::new().collect(&outcomes);
        assert!((metrics.page_load_time_seconds - 2.0).abs() < 1e-9);
        assert!((metrics.avg_time_on_page_seconds - 11.0).abs() < 1e-9);
        assert_eq!(metrics.interactions_count, 2);
        // only /pricing saw no interaction
        assert!((metrics.bounce_rate_fraction - 1.0 / 3.0).abs() < 1e-9);
        // one failed interaction + one error over two interactions + one error
        assert!((metrics.error_rate_fraction - 2.0 / 3.0).abs() < 1e-9);
        assert!(metrics.is_valid());
    }

    #[test]
    fn test_consecutive_page_loads_bounce() {
        let outcomes = vec![outcome(vec![
            E::page_load("/a", 1.0, 1.0),
            E::page_load("/b", 1.0, 1.0),
            E::observation("nothing to click"),
        ])];
        let metrics = MetricsCollector::new().collect(&outcomes);
        assert!((metrics.bounce_rate_fraction - 1.0).abs() < f64::EPSILON);
        assert!(metrics.error_rate_fraction.abs() < f64::EPSILON);
    }
}
