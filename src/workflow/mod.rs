//! The fixed two-step conversation workflow.
//!
//! `profile_building → event_discovery → end`. There are no branches and no
//! loops, and a run always reaches the end: faults inside a step are turned
//! into a [`StepOutcome`] instead of being returned.

pub mod discovery;
pub mod profile;

pub use discovery::{build_system_prompt, EventDiscoveryNode, ModelSource, FALLBACK_REPLY};
pub use profile::ProfileIntakeNode;

use async_trait::async_trait;
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{debug, info_span, Instrument};

use crate::config::ScoutConfig;
use crate::error::Result;
use crate::models::LanguageModel;
use crate::tools::event_search_registry;
use crate::types::{ConversationState, GenerationSettings, Message};

/// Identifies a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeId {
    ProfileBuilding,
    EventDiscovery,
}

/// Typed result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran; `appended` messages were added.
    Completed { appended: usize },
    /// The step had nothing to do and left state untouched.
    Skipped { reason: String },
    /// The step failed and appended the fallback reply instead.
    Recovered { error: String },
}

/// One unit of work applied to conversation state.
#[async_trait]
pub trait Node: Send + Sync {
    fn id(&self) -> NodeId;

    async fn run(&self, state: &mut ConversationState) -> StepOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub node: NodeId,
    pub outcome: StepOutcome,
}

/// Final state of a run plus what each step did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: ConversationState,
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    /// Whether any step fell back to the apology reply.
    pub fn recovered(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s.outcome, StepOutcome::Recovered { .. }))
    }

    pub fn outcome(&self, node: NodeId) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|s| s.node == node)
            .map(|s| &s.outcome)
    }
}

/// Profile intake followed by event discovery.
#[derive(Debug, Clone)]
pub struct Workflow {
    intake: ProfileIntakeNode,
    discovery: EventDiscoveryNode,
}

impl Workflow {
    pub fn new(intake: ProfileIntakeNode, discovery: EventDiscoveryNode) -> Self {
        Self { intake, discovery }
    }

    /// Wire the standard workflow from configuration.
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let model: LanguageModel = config.model().parse()?;
        let tools = event_search_registry(config)?;
        let settings = GenerationSettings::builder()
            .temperature(config.temperature())
            .build();
        let discovery = EventDiscoveryNode::new(
            ModelSource::Configured {
                model,
                config: config.clone(),
            },
            tools,
        )
        .with_settings(settings);
        Ok(Self::new(ProfileIntakeNode, discovery))
    }

    /// Steps in execution order.
    pub fn sequence(&self) -> [&dyn Node; 2] {
        [&self.intake, &self.discovery]
    }

    /// Run every step once, in order, and return the final state.
    pub async fn invoke(&self, mut state: ConversationState) -> RunReport {
        let run_id = uuid::Uuid::new_v4();
        let span = info_span!("workflow", %run_id);

        async move {
            let mut steps = Vec::with_capacity(2);
            for node in self.sequence() {
                let before = state.messages().len();
                let outcome = node.run(&mut state).await;
                debug!(
                    node = %node.id(),
                    ?outcome,
                    messages_before = before,
                    messages_after = state.messages().len(),
                    "step finished"
                );
                steps.push(StepRecord {
                    node: node.id(),
                    outcome,
                });
            }
            RunReport { state, steps }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_use_step_names() {
        assert_eq!(NodeId::ProfileBuilding.to_string(), "profile_building");
        assert_eq!(
            "event_discovery".parse::<NodeId>().unwrap(),
            NodeId::EventDiscovery
        );
    }

    #[test]
    fn from_config_wires_fixed_sequence() {
        let workflow = Workflow::from_config(&ScoutConfig::new()).unwrap();
        let ids: Vec<_> = workflow.sequence().iter().map(|n| n.id()).collect();
        assert_eq!(ids, [NodeId::ProfileBuilding, NodeId::EventDiscovery]);
    }

    #[test]
    fn from_config_rejects_malformed_model() {
        let mut config = ScoutConfig::new();
        config.set_model("gpt-4o");
        assert!(Workflow::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn run_without_user_message_is_a_no_op() {
        let workflow = Workflow::from_config(&ScoutConfig::new()).unwrap();
        let state =
            ConversationState::new().with_messages(vec![Message::assistant("Welcome back!")]);

        let report = workflow.invoke(state.clone()).await;

        assert_eq!(report.messages(), state.messages());
        assert!(matches!(
            report.outcome(NodeId::EventDiscovery),
            Some(StepOutcome::Skipped { .. })
        ));
        assert!(!report.recovered());
    }
}
