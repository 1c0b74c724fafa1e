//! Concrete capability implementations.

pub mod catalog_persona;
pub mod keyword_judge;
pub mod mock;
pub mod replay;
pub mod transcript_interviewer;

pub use catalog_persona::{Archetype, CatalogPersonaResearcher};
pub use keyword_judge::KeywordJudge;
pub use mock::{MockInterviewer, MockJudge, MockNavigation, MockNavigator, MockPersonaResearcher};
pub use replay::{ReplayNavigator, ReplayScriptError};
pub use transcript_interviewer::RuleBasedInterviewer;
