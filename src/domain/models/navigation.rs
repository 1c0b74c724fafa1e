//! Navigation events, navigation reports and judgment verdicts.
//!
//! These are the payloads exchanged with the navigation and judgment
//! capabilities. Each carries a structural check used by the runner to tell a
//! broken collaborator apart from a failed attempt.

use serde::{Deserialize, Serialize};

/// One raw interaction event observed while driving the target application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// A page finished loading
    PageLoad {
        url: String,
        load_time_seconds: f64,
        #[serde(default)]
        time_on_page_seconds: f64,
    },
    /// The persona acted on an element
    Interaction {
        action: String,
        target: String,
        succeeded: bool,
    },
    /// Free-text note made by the navigator
    Observation { note: String },
    /// Something went wrong in the application
    Error { message: String },
}

impl NavigationEvent {
    pub fn page_load(url: impl Into<String>, load_time_seconds: f64, time_on_page_seconds: f64) -> Self {
        Self::PageLoad {
            url: url.into(),
            load_time_seconds,
            time_on_page_seconds,
        }
    }

    pub fn interaction(action: impl Into<String>, target: impl Into<String>, succeeded: bool) -> Self {
        Self::Interaction {
            action: action.into(),
            target: target.into(),
            succeeded,
        }
    }

    pub fn observation(note: impl Into<String>) -> Self {
        Self::Observation { note: note.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Short human-readable description used in reports.
    pub fn summary(&self) -> String {
        match self {
            Self::PageLoad {
                url,
                load_time_seconds,
                ..
            } => format!("loaded {url} in {load_time_seconds:.2}s"),
            Self::Interaction {
                action,
                target,
                succeeded,
            } => {
                let result = if *succeeded { "ok" } else { "failed" };
                format!("{action} {target} ({result})")
            }
            Self::Observation { note } => note.clone(),
            Self::Error { message } => format!("error: {message}"),
        }
    }

    fn contract_violation(&self) -> Option<String> {
        match self {
            Self::PageLoad {
                url,
                load_time_seconds,
                time_on_page_seconds,
            } => {
                if url.trim().is_empty() {
                    return Some("page_load event has an empty url".to_string());
                }
                if !is_duration(*load_time_seconds) || !is_duration(*time_on_page_seconds) {
                    return Some(format!("page_load event for {url} has an invalid duration"));
                }
                None
            }
            Self::Interaction { .. } | Self::Observation { .. } | Self::Error { .. } => None,
        }
    }
}

fn is_duration(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Response of the navigation capability for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationReport {
    #[serde(default)]
    pub events: Vec<NavigationEvent>,
    pub outcome_description: String,
}

impl NavigationReport {
    pub fn new(events: Vec<NavigationEvent>, outcome_description: impl Into<String>) -> Self {
        Self {
            events,
            outcome_description: outcome_description.into(),
        }
    }

    /// Returns a description of the first structural problem, if any.
    pub fn contract_violation(&self) -> Option<String> {
        if self.outcome_description.trim().is_empty() {
            return Some("navigation report has an empty outcome description".to_string());
        }
        self.events.iter().find_map(NavigationEvent::contract_violation)
    }
}

/// Verdict of the judgment capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub satisfied: bool,
    pub reason: String,
}

impl Verdict {
    pub fn satisfied(reason: impl Into<String>) -> Self {
        Self {
            satisfied: true,
            reason: reason.into(),
        }
    }

    pub fn unsatisfied(reason: impl Into<String>) -> Self {
        Self {
            satisfied: false,
            reason: reason.into(),
        }
    }

    pub fn contract_violation(&self) -> Option<String> {
        self.reason
            .trim()
            .is_empty()
            .then(|| "verdict has an empty reason".to_string())
    }
}
