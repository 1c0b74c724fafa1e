//! Domain errors for the critique engine.
//!
//! Only [`DomainError`] ever escapes an engine run. Capability failures are
//! reported through [`CapabilityError`] and either absorbed into outcome data
//! (transient) or promoted to a contract fault (malformed). Per-attempt
//! failures are described by [`AttemptFailure`] and never leave the runner.

use thiserror::Error;

/// Fatal errors that abort a critique run before a report is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    ValidationFault(String),

    #[error("Collaborator contract violated by {collaborator}: {reason}")]
    CollaboratorContractFault { collaborator: String, reason: String },
}

impl DomainError {
    /// Build a contract fault for the named collaborator.
    pub fn contract(collaborator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CollaboratorContractFault {
            collaborator: collaborator.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from input validation.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFault(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure reported by an external capability (navigation, judgment,
/// persona research, interview).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability did not answer usefully this time; retrying may help.
    #[error("capability unavailable: {0}")]
    Transient(String),

    /// The capability answered with a payload that breaks its contract.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl CapabilityError {
    /// Promote a malformed response into a fatal fault, leaving transient
    /// failures for the caller to absorb.
    pub fn into_contract_fault(self, collaborator: &str) -> Result<String, DomainError> {
        match self {
            Self::Transient(reason) => Ok(reason),
            Self::Malformed(reason) => Err(DomainError::contract(collaborator, reason)),
        }
    }
}

/// Why a single attempt at an instruction did not succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    #[error("success criteria not met: {0}")]
    NotSatisfied(String),

    #[error("navigation unavailable: {0}")]
    NavigationUnavailable(String),

    #[error("judgment unavailable: {0}")]
    JudgmentUnavailable(String),

    #[error("{capability} timed out after {millis}ms")]
    TimedOut { capability: String, millis: u128 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_is_absorbed() {
        let err = CapabilityError::Transient("no response".to_string());
        assert_eq!(err.into_contract_fault("navigator"), Ok("no response".to_string()));
    }

    #[test]
    fn test_malformed_becomes_contract_fault() {
        let err = CapabilityError::Malformed("missing events".to_string());
        let fault = err.into_contract_fault("navigator").unwrap_err();
        assert_eq!(
            fault.to_string(),
            "Collaborator contract violated by navigator: missing events"
        );
        assert!(!fault.is_validation());
    }

    #[test]
    fn test_attempt_failure_messages() {
        let timed_out = AttemptFailure::TimedOut {
            capability: "navigation".to_string(),
            millis: 30_000,
        };
        assert_eq!(timed_out.to_string(), "navigation timed out after 30000ms");
        assert_eq!(
            AttemptFailure::NotSatisfied("button hidden".to_string()).to_string(),
            "success criteria not met: button hidden"
        );
    }
}
