//! Judgment port - decides whether an attempt met its success criteria.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;
use crate::domain::models::Verdict;

#[async_trait]
pub trait Judge: Send + Sync {
    fn name(&self) -> &'static str;

    /// Compare an outcome description against the success criteria.
    async fn judge(
        &self,
        outcome_description: &str,
        success_criteria: &str,
    ) -> Result<Verdict, CapabilityError>;
}
