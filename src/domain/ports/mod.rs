//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that capability adapters must implement:
//! - Navigator: drives the application under test
//! - Judge: decides whether an attempt met its success criteria
//! - PersonaResearcher: builds the persona profile
//! - Interviewer: simulates the post-session interview
//!
//! These traits keep the engine independent of any specific browser
//! automation, search or language-model backend.

pub mod interviewer;
pub mod judge;
pub mod navigator;
pub mod persona_researcher;

pub use interviewer::Interviewer;
pub use judge::Judge;
pub use navigator::Navigator;
pub use persona_researcher::PersonaResearcher;
