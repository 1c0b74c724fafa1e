//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use critiquer::adapters::capabilities::{
    MockInterviewer, MockJudge, MockNavigation, MockNavigator, MockPersonaResearcher,
};
use critiquer::domain::models::{InstructionPriority, NavigationEvent, TestingInstruction};
use critiquer::{Capabilities, Config};
use tempfile::NamedTempFile;

pub const APP_URL: &str = "https://shop.example";

/// Minimal valid configuration with the given instructions
pub fn config(instructions: Vec<TestingInstruction>) -> Config {
    Config {
        app_url: APP_URL.to_string(),
        persona_type: "novice".to_string(),
        testing_instructions: instructions,
        ..Config::default()
    }
}

pub fn find_login() -> TestingInstruction {
    TestingInstruction::new(
        "find login",
        InstructionPriority::High,
        2,
        "login button located",
        "document issue",
    )
}

/// A navigation report with one page load followed by a successful click
pub fn loaded_page(load_time_seconds: f64, outcome: &str) -> MockNavigation {
    MockNavigation::report(
        vec![
            NavigationEvent::page_load(APP_URL, load_time_seconds, 8.0),
            NavigationEvent::interaction("click", "#login", true),
        ],
        outcome,
    )
}

/// Mock capabilities around the given navigator
pub fn mock_capabilities(navigator: MockNavigator) -> Capabilities {
    Capabilities {
        persona_researcher: Arc::new(MockPersonaResearcher::new()),
        navigator: Arc::new(navigator),
        judge: Arc::new(MockJudge::new()),
        interviewer: Arc::new(MockInterviewer::new()),
    }
}

/// Write `contents` to a temporary file with the given suffix
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
