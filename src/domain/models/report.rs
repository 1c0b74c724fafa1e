//! The critique report: a fixed, ordered sequence of named sections.

use serde::{Deserialize, Serialize};

use super::instruction::InstructionPriority;

/// Report sections, declared in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ExecutiveSummary,
    TechnicalAnalysis,
    UserInsights,
    InterviewFeedback,
    CompetitiveAnalysis,
    PrioritizedRecommendations,
    Appendix,
}

impl SectionKind {
    /// Every section, in the order it appears in a report.
    pub const ALL: [Self; 7] = [
        Self::ExecutiveSummary,
        Self::TechnicalAnalysis,
        Self::UserInsights,
        Self::InterviewFeedback,
        Self::CompetitiveAnalysis,
        Self::PrioritizedRecommendations,
        Self::Appendix,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::TechnicalAnalysis => "Technical Analysis",
            Self::UserInsights => "User Insights",
            Self::InterviewFeedback => "Interview Feedback",
            Self::CompetitiveAnalysis => "Competitive Analysis",
            Self::PrioritizedRecommendations => "Prioritized Recommendations",
            Self::Appendix => "Appendix",
        }
    }
}

/// Recommendation buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    High,
    Medium,
    Low,
}

impl RecommendationTier {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Bucket for a pain point; untraceable pain points land in `Medium`.
    pub const fn for_priority(priority: Option<InstructionPriority>) -> Self {
        match priority {
            Some(InstructionPriority::High) => Self::High,
            Some(InstructionPriority::Low) => Self::Low,
            Some(InstructionPriority::Medium) | None => Self::Medium,
        }
    }

    pub const fn heading(&self) -> &'static str {
        match self {
            Self::High => "High Priority (Immediate)",
            Self::Medium => "Medium Priority (Short-term)",
            Self::Low => "Low Priority (Long-term)",
        }
    }
}

/// A unit of section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBlock {
    Paragraph { text: String },
    Field { label: String, value: String },
    List { heading: Option<String>, items: Vec<String> },
    /// Stands in for a collection that turned out empty
    Placeholder { heading: Option<String>, text: String },
}

impl ReportBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A list, or a placeholder when `items` is empty.
    pub fn list_or(heading: Option<&str>, items: Vec<String>, placeholder: &str) -> Self {
        let heading = heading.map(str::to_string);
        if items.is_empty() {
            Self::Placeholder {
                heading,
                text: placeholder.to_string(),
            }
        } else {
            Self::List { heading, items }
        }
    }

    fn to_markdown(&self) -> String {
        match self {
            Self::Paragraph { text } => text.clone(),
            Self::Field { label, value } => format!("- **{label}:** {value}"),
            Self::List { heading, items } => {
                let mut out = heading_line(heading.as_deref());
                let lines: Vec<String> = items.iter().map(|item| format!("- {item}")).collect();
                out.push_str(&lines.join("\n"));
                out
            }
            Self::Placeholder { heading, text } => {
                let mut out = heading_line(heading.as_deref());
                out.push_str(&format!("_{text}_"));
                out
            }
        }
    }
}

fn heading_line(heading: Option<&str>) -> String {
    heading.map_or_else(String::new, |h| format!("### {h}\n\n"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub title: String,
    pub blocks: Vec<ReportBlock>,
}

impl ReportSection {
    pub fn new(kind: SectionKind, blocks: Vec<ReportBlock>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            blocks,
        }
    }

    /// All list items in the section under the given heading.
    pub fn list_items(&self, heading: &str) -> Option<&[String]> {
        self.blocks.iter().find_map(|block| match block {
            ReportBlock::List {
                heading: Some(h),
                items,
            } if h == heading => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn has_placeholder(&self, heading: &str) -> bool {
        self.blocks.iter().any(|block| {
            matches!(block, ReportBlock::Placeholder { heading: Some(h), .. } if h == heading)
        })
    }

    fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n\n", self.title);
        let mut previous: Option<&ReportBlock> = None;
        for block in &self.blocks {
            if let Some(prev) = previous {
                let both_fields =
                    matches!(prev, ReportBlock::Field { .. }) && matches!(block, ReportBlock::Field { .. });
                out.push_str(if both_fields { "\n" } else { "\n\n" });
            }
            out.push_str(&block.to_markdown());
            previous = Some(block);
        }
        out.push('\n');
        out
    }
}

/// Terminal artifact of a run. Immutable once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritiqueReport {
    sections: Vec<ReportSection>,
}

impl CritiqueReport {
    /// Title line of the Markdown document.
    pub const TITLE: &'static str = "Product Critique Report";

    pub(crate) const fn from_sections(sections: Vec<ReportSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Serialize as Markdown, one `##` heading per section in order.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n", Self::TITLE);
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.to_markdown());
        }
        out
    }
}
