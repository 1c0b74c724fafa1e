//! Interview port - turns navigation findings into a simulated interview.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;
use crate::domain::models::{InstructionOutcome, InterviewResult, PersonaProfile};

#[async_trait]
pub trait Interviewer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Interview the persona about the outcomes, in execution order.
    async fn interview(
        &self,
        outcomes: &[InstructionOutcome],
        persona: &PersonaProfile,
    ) -> Result<InterviewResult, CapabilityError>;
}
