//! Navigator that replays recorded navigation attempts from a YAML script.
//!
//! ```yaml
//! tasks:
//!   find login:
//!     - unavailable: browser did not respond
//!     - outcome: Login button located in the header
//!       events:
//!         - type: page_load
//!           url: https://shop.example/
//!           load_time_seconds: 1.4
//!           time_on_page_seconds: 6
//!         - type: interaction
//!           action: click
//!           target: "#login"
//!           succeeded: true
//! ```
//!
//! Each call consumes the next attempt scripted for the task. Tasks are
//! matched ignoring case and surrounding whitespace. An exhausted or unknown
//! task answers as transiently unavailable.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::errors::CapabilityError;
use crate::domain::models::{NavigationEvent, NavigationReport, PersonaProfile};
use crate::domain::ports::Navigator;

#[derive(Debug, Error)]
pub enum ReplayScriptError {
    #[error("Failed to read navigation script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse navigation script: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One recorded attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScriptedAttempt {
    Report {
        outcome: String,
        #[serde(default)]
        events: Vec<NavigationEvent>,
    },
    Unavailable {
        unavailable: String,
    },
    Malformed {
        malformed: String,
    },
}

#[derive(Debug, Deserialize)]
struct NavigationScript {
    #[serde(default)]
    tasks: HashMap<String, Vec<ScriptedAttempt>>,
}

fn task_key(task: &str) -> String {
    task.trim().to_lowercase()
}

pub struct ReplayNavigator {
    attempts: Mutex<HashMap<String, VecDeque<ScriptedAttempt>>>,
}

impl ReplayNavigator {
    /// A navigator with nothing recorded; every task answers unavailable.
    pub fn empty() -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReplayScriptError> {
        let script: NavigationScript = serde_yaml::from_str(yaml)?;
        let attempts = script
            .tasks
            .into_iter()
            .map(|(task, attempts)| (task_key(&task), attempts.into_iter().collect()))
            .collect::<HashMap<_, VecDeque<_>>>();

        info!(tasks = attempts.len(), "Loaded navigation script");
        Ok(Self {
            attempts: Mutex::new(attempts),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReplayScriptError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ReplayScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Attempts still queued for a task.
    pub async fn remaining(&self, task: &str) -> usize {
        self.attempts
            .lock()
            .await
            .get(&task_key(task))
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl Navigator for ReplayNavigator {
    fn name(&self) -> &'static str {
        "replay-navigator"
    }

    async fn navigate(
        &self,
        task: &str,
        _persona: &PersonaProfile,
    ) -> Result<NavigationReport, CapabilityError> {
        let next = self
            .attempts
            .lock()
            .await
            .get_mut(&task_key(task))
            .and_then(VecDeque::pop_front);

        match next {
            Some(ScriptedAttempt::Report { outcome, events }) => {
                debug!(task, events = events.len(), "Replaying recorded attempt");
                Ok(NavigationReport::new(events, outcome))
            }
            Some(ScriptedAttempt::Unavailable { unavailable }) => {
                Err(CapabilityError::Transient(unavailable))
            }
            Some(ScriptedAttempt::Malformed { malformed }) => Err(CapabilityError::Malformed(malformed)),
            None => Err(CapabilityError::Transient(format!(
                "no recorded attempt left for '{task}'"
            ))),
        }
    }
}
