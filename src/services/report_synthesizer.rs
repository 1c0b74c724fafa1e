//! Renders a [`FindingsModel`] into the seven-section critique report.
//!
//! Rendering is pure: identical findings always produce an identical report,
//! and list items keep the order they have in the findings.

use crate::domain::models::{
    CritiqueReport, FindingsModel, NavigationEvent, OutcomeStatus, PainPoint, RecommendationTier,
    ReportBlock, ReportSection, SectionKind,
};

/// Page loads slower than this are flagged as a concern.
const SLOW_LOAD_SECS: f64 = 4.0;
/// Page loads faster than this are called out as a strength.
const FAST_LOAD_SECS: f64 = 2.0;
/// Usability below this is flagged as a concern.
const USABILITY_CONCERN_BELOW: f64 = 0.8;

const NO_PAIN_POINTS: &str = "No pain points were identified.";

#[derive(Debug, Clone)]
pub struct ReportSynthesizer {
    top_pain_points: usize,
}

impl Default for ReportSynthesizer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ReportSynthesizer {
    pub const fn new(top_pain_points: usize) -> Self {
        Self { top_pain_points }
    }

    pub fn render(&self, findings: &FindingsModel) -> CritiqueReport {
        let sections = SectionKind::ALL
            .iter()
            .map(|&kind| {
                let blocks = match kind {
                    SectionKind::ExecutiveSummary => self.executive_summary(findings),
                    SectionKind::TechnicalAnalysis => technical_analysis(findings),
                    SectionKind::UserInsights => user_insights(findings),
                    SectionKind::InterviewFeedback => interview_feedback(findings),
                    SectionKind::CompetitiveAnalysis => competitive_analysis(findings),
                    SectionKind::PrioritizedRecommendations => recommendations(findings),
                    SectionKind::Appendix => appendix(findings),
                };
                ReportSection::new(kind, blocks)
            })
            .collect();

        CritiqueReport::from_sections(sections)
    }

    fn executive_summary(&self, findings: &FindingsModel) -> Vec<ReportBlock> {
        let scores = &findings.scores;
        let count = |status: OutcomeStatus| {
            findings
                .outcomes
                .iter()
                .filter(|o| o.final_status == status)
                .count()
        };

        let top: Vec<String> = findings
            .pain_points
            .iter()
            .take(self.top_pain_points)
            .map(|p| p.description.clone())
            .collect();

        vec![
            ReportBlock::paragraph(format!(
                "Usability critique of {} from the perspective of a {} persona.",
                findings.context.app_url, findings.persona.persona_type
            )),
            ReportBlock::field(
                "Overall Health",
                score_value(scores.overall_health_score, scores.overall_label().as_str()),
            ),
            ReportBlock::field(
                "Performance",
                score_value(scores.performance_score, scores.performance_label().as_str()),
            ),
            ReportBlock::field(
                "Usability",
                score_value(scores.usability_score, scores.usability_label().as_str()),
            ),
            ReportBlock::field(
                "Instructions",
                format!(
                    "{} run: {} succeeded, {} fallback invoked, {} skipped",
                    findings.outcomes.len(),
                    count(OutcomeStatus::Succeeded),
                    count(OutcomeStatus::FallbackInvoked),
                    count(OutcomeStatus::Skipped),
                ),
            ),
            ReportBlock::list_or(Some("Top Pain Points"), top, NO_PAIN_POINTS),
        ]
    }
}

fn score_value(score: f64, label: &str) -> String {
    format!("{score:.2} ({label})")
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn technical_analysis(findings: &FindingsModel) -> Vec<ReportBlock> {
    let metrics = &findings.metrics;
    let scores = &findings.scores;

    let mut concerns = Vec::new();
    if metrics.page_load_time_seconds > SLOW_LOAD_SECS {
        concerns.push(format!(
            "Slow page load time of {:.2}s (above {SLOW_LOAD_SECS:.0}s)",
            metrics.page_load_time_seconds
        ));
    }
    if scores.usability_score < USABILITY_CONCERN_BELOW {
        concerns.push(format!(
            "Usability score of {:.2} is below {USABILITY_CONCERN_BELOW:.2}",
            scores.usability_score
        ));
    }

    let mut strengths = Vec::new();
    if metrics.page_load_time_seconds > 0.0 && metrics.page_load_time_seconds < FAST_LOAD_SECS {
        strengths.push(format!(
            "Fast page load time of {:.2}s",
            metrics.page_load_time_seconds
        ));
    }

    vec![
        ReportBlock::field("Page Load Time", format!("{:.2}s", metrics.page_load_time_seconds)),
        ReportBlock::field("Interactions", metrics.interactions_count.to_string()),
        ReportBlock::field(
            "Average Time on Page",
            format!("{:.2}s", metrics.avg_time_on_page_seconds),
        ),
        ReportBlock::field("Bounce Rate", percent(metrics.bounce_rate_fraction)),
        ReportBlock::field("Error Rate", percent(metrics.error_rate_fraction)),
        ReportBlock::field(
            "Performance Score",
            score_value(scores.performance_score, scores.performance_label().as_str()),
        ),
        ReportBlock::field(
            "Usability Score",
            score_value(scores.usability_score, scores.usability_label().as_str()),
        ),
        ReportBlock::field(
            "Overall Health Score",
            score_value(scores.overall_health_score, scores.overall_label().as_str()),
        ),
        ReportBlock::list_or(Some("Concerns"), concerns, "No technical concerns were detected."),
        ReportBlock::list_or(Some("Strengths"), strengths, "No notable strengths were measured."),
    ]
}

fn user_insights(findings: &FindingsModel) -> Vec<ReportBlock> {
    let persona = &findings.persona;
    let pain_points = findings.pain_points.iter().map(|p| p.description.clone()).collect();

    vec![
        ReportBlock::field("Persona", persona.persona_type.clone()),
        ReportBlock::field("Background", persona.background.clone()),
        ReportBlock::list_or(
            Some("Behavioral Traits"),
            persona.behavioral_traits.clone(),
            "No behavioral traits were recorded.",
        ),
        ReportBlock::list_or(Some("Pain Points"), pain_points, NO_PAIN_POINTS),
        ReportBlock::list_or(
            Some("Improvement Suggestions"),
            findings.suggestions.clone(),
            "No improvement suggestions were recorded.",
        ),
    ]
}

fn interview_feedback(findings: &FindingsModel) -> Vec<ReportBlock> {
    let satisfaction = findings
        .satisfaction_score
        .map_or_else(|| "Not available".to_string(), |score| format!("{score}/10"));
    let quotes = findings.quotes.iter().map(|q| format!("\"{q}\"")).collect();

    vec![
        ReportBlock::field("Satisfaction Score", satisfaction),
        ReportBlock::list_or(Some("Selected Quotes"), quotes, "No interview quotes were captured."),
    ]
}

fn competitive_analysis(findings: &FindingsModel) -> Vec<ReportBlock> {
    let context = &findings.context;
    let mut blocks = Vec::new();

    match &context.benchmark {
        Some(benchmark) => {
            let current = findings.metrics.page_load_time_seconds;
            let target = benchmark.page_load_time_seconds;
            let comparison = if current < target {
                format!("Better than benchmark by {:.2}s", target - current)
            } else {
                format!("Slower than benchmark by {:.2}s", current - target)
            };
            blocks.push(ReportBlock::field("Benchmark Page Load Time", format!("{target:.2}s")));
            blocks.push(ReportBlock::field("Page Load Comparison", comparison));
        }
        None => blocks.push(ReportBlock::Placeholder {
            heading: Some("Benchmark".to_string()),
            text: "No benchmark was configured.".to_string(),
        }),
    }

    let competitors = context
        .competitors
        .iter()
        .map(|c| {
            let mut line = c.name.clone();
            if let Some(url) = &c.url {
                line.push_str(&format!(" ({url})"));
            }
            if let Some(notes) = &c.notes {
                line.push_str(&format!(": {notes}"));
            }
            line
        })
        .collect();
    blocks.push(ReportBlock::list_or(
        Some("Competitors"),
        competitors,
        "No competitors were configured.",
    ));

    blocks
}

fn recommendation(pain_point: &PainPoint) -> String {
    match &pain_point.mitigation {
        Some(mitigation) if pain_point.is_fallback() => {
            format!("{} (mitigation applied: {mitigation})", pain_point.description)
        }
        _ => pain_point.description.clone(),
    }
}

fn recommendations(findings: &FindingsModel) -> Vec<ReportBlock> {
    RecommendationTier::ALL
        .iter()
        .map(|&tier| {
            let items = findings
                .pain_points
                .iter()
                .filter(|p| RecommendationTier::for_priority(p.instruction_priority()) == tier)
                .map(recommendation)
                .collect();
            ReportBlock::list_or(Some(tier.heading()), items, "No recommendations at this priority.")
        })
        .collect()
}

fn appendix(findings: &FindingsModel) -> Vec<ReportBlock> {
    let log = findings
        .outcomes
        .iter()
        .map(|outcome| {
            let instruction = &outcome.instruction;
            let mut line = format!(
                "[{}] {}: {} after {}/{} attempts, {} events",
                instruction.priority,
                instruction.task,
                outcome.final_status,
                outcome.attempts_used,
                instruction.max_attempts,
                outcome.events.len(),
            );
            if let Some(reason) = outcome.last_judged_reason() {
                line.push_str(&format!("; last result: {reason}"));
            }
            if !outcome.events.is_empty() {
                let trace: Vec<String> =
                    outcome.events.iter().map(NavigationEvent::summary).collect();
                line.push_str(&format!("; trace: {}", trace.join(", ")));
            }
            line
        })
        .collect();

    vec![
        ReportBlock::field("Application URL", findings.context.app_url.clone()),
        ReportBlock::field("Persona Type", findings.persona.persona_type.clone()),
        ReportBlock::list_or(Some("Execution Log"), log, "No instructions were executed."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AttemptResult, BenchmarkConfig, Competitor, DerivedScores, InstructionOutcome,
        InstructionPriority, InterviewTranscript, PainPointOrigin, PersonaProfile, RunContext,
        SessionMetrics, TestingInstruction,
    };

    fn findings() -> FindingsModel {
        let instruction = TestingInstruction::new(
            "find login",
            InstructionPriority::High,
            2,
            "login button located",
            "document issue",
        );
        let outcome = InstructionOutcome::fallback(
            instruction,
            vec![],
            AttemptResult {
                attempt_number: 2,
                succeeded: false,
                raw_events: vec![],
                judged_reason: "success criteria not met: no login link".to_string(),
            },
        );

        FindingsModel {
            context: RunContext {
                app_url: "https://shop.example".to_string(),
                benchmark: None,
                competitors: vec![],
            },
            persona: PersonaProfile::new("novice", "Occasional shopper", vec![]),
            outcomes: vec![outcome],
            metrics: SessionMetrics {
                page_load_time_seconds: 5.0,
                interactions_count: 4,
                avg_time_on_page_seconds: 12.5,
                bounce_rate_fraction: 0.25,
                error_rate_fraction: 0.5,
            },
            scores: DerivedScores {
                performance_score: 0.625,
                usability_score: 0.6,
                overall_health_score: 0.61,
            },
            pain_points: vec![
                PainPoint {
                    description: "find login: document issue".to_string(),
                    origin: PainPointOrigin::Instruction {
                        task: "find login".to_string(),
                        priority: InstructionPriority::High,
                        fallback: true,
                    },
                    mitigation: Some("document issue".to_string()),
                },
                PainPoint {
                    description: "The menu was confusing.".to_string(),
                    origin: PainPointOrigin::Interview,
                    mitigation: None,
                },
            ],
            suggestions: vec![],
            satisfaction_score: Some(4),
            quotes: vec!["The menu was confusing.".to_string()],
            transcript: InterviewTranscript::default(),
        }
    }

    #[test]
    fn test_all_sections_in_order() {
        let report = ReportSynthesizer::default().render(&findings());
        let kinds: Vec<_> = report.sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn test_fallback_lands_in_high_priority() {
        let report = ReportSynthesizer::default().render(&findings());
        let section = report.section(SectionKind::PrioritizedRecommendations).unwrap();
        assert_eq!(
            section.list_items("High Priority (Immediate)").unwrap(),
            &["find login: document issue (mitigation applied: document issue)".to_string()]
        );
        assert_eq!(
            section.list_items("Medium Priority (Short-term)").unwrap(),
            &["The menu was confusing.".to_string()]
        );
        assert!(section.has_placeholder("Low Priority (Long-term)"));
    }

    #[test]
    fn test_top_pain_points_limited() {
        let report = ReportSynthesizer::new(1).render(&findings());
        let summary = report.section(SectionKind::ExecutiveSummary).unwrap();
        assert_eq!(
            summary.list_items("Top Pain Points").unwrap(),
            &["find login: document issue".to_string()]
        );
    }

    #[test]
    fn test_technical_concerns() {
        let report = ReportSynthesizer::default().render(&findings());
        let section = report.section(SectionKind::TechnicalAnalysis).unwrap();
        let concerns = section.list_items("Concerns").unwrap();
        assert_eq!(concerns.len(), 2);
        assert!(concerns[0].starts_with("Slow page load time of 5.00s"));
        assert!(section.has_placeholder("Strengths"));
    }

    #[test]
    fn test_competitive_analysis_with_benchmark() {
        let mut findings = findings();
        findings.context.benchmark = Some(BenchmarkConfig {
            page_load_time_seconds: 3.0,
        });
        findings.context.competitors = vec![Competitor {
            name: "RivalShop".to_string(),
            url: Some("https://rival.example".to_string()),
            notes: None,
        }];

        let report = ReportSynthesizer::default().render(&findings);
        let markdown = report.to_markdown();
        assert!(markdown.contains("- **Page Load Comparison:** Slower than benchmark by 2.00s"));
        assert!(markdown.contains("- RivalShop (https://rival.example)"));
    }

    #[test]
    fn test_appendix_logs_outcomes() {
        let report = ReportSynthesizer::default().render(&findings());
        let appendix = report.section(SectionKind::Appendix).unwrap();
        assert_eq!(
            appendix.list_items("Execution Log").unwrap(),
            &["[high] find login: fallback_invoked after 2/2 attempts, 0 events; \
last result: success criteria not met: no login link"
                .to_string()]
        );
    }

    #[test]
    fn test_appendix_includes_event_trace() {
        let mut findings = findings();
        findings.outcomes[0].events = vec![
            NavigationEvent::page_load("https://shop.example/", 1.5, 4.0),
            NavigationEvent::interaction("click", "#menu", false),
        ];

        let report = ReportSynthesizer::default().render(&findings);
        let log = report
            .section(SectionKind::Appendix)
            .unwrap()
            .list_items("Execution Log")
            .unwrap();
        assert!(log[0].contains("2 events"));
        assert!(log[0].ends_with(
            "; trace: loaded https://shop.example/ in 1.50s, click #menu (failed)"
        ));
    }

    #[test]
    fn test_render_is_deterministic() {
        let synthesizer = ReportSynthesizer::default();
        let findings = findings();
        assert_eq!(
            synthesizer.render(&findings).to_markdown(),
            synthesizer.render(&findings).to_markdown()
        );
    }
}
