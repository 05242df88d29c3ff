//! Profile intake step.

use async_trait::async_trait;
use tracing::debug;

use super::{Node, NodeId, StepOutcome};
use crate::types::{ConversationState, UserProfile};

/// Seeds `state.profile` from the survey answers carried in the state.
///
/// Whatever profile the state held before is replaced; without a survey the
/// profile ends up empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileIntakeNode;

#[async_trait]
impl Node for ProfileIntakeNode {
    fn id(&self) -> NodeId {
        NodeId::ProfileBuilding
    }

    async fn run(&self, state: &mut ConversationState) -> StepOutcome {
        state.profile = UserProfile::from_survey(state.survey.as_ref());
        debug!(
            has_survey = state.survey.is_some(),
            interests = state.profile.interests.len(),
            "profile built"
        );
        StepOutcome::Completed { appended: 0 }
    }
}
