//! Conversation persistence between workflow runs.
//!
//! A run is a single turn. [`ChatSession`] loads the previous state for a
//! session id, appends the user's message, runs the workflow and stores the
//! result.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{Result, ScoutError};
use crate::types::ConversationState;
use crate::workflow::{RunReport, Workflow};

/// Storage for conversation state keyed by session id.
pub trait SessionStore: Send + Sync {
    fn load(&self, session_id: &str) -> Result<Option<ConversationState>>;

    fn save(&self, session_id: &str, state: &ConversationState) -> Result<()>;

    fn remove(&self, session_id: &str) -> Result<bool>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, ConversationState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> ScoutError {
    ScoutError::Session("session store lock poisoned".into())
}

impl SessionStore for MemorySessionStore {
    fn load(&self, session_id: &str) -> Result<Option<ConversationState>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(session_id).cloned())
    }

    fn save(&self, session_id: &str, state: &ConversationState) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.insert(session_id.to_string(), state.clone());
        Ok(())
    }

    fn remove(&self, session_id: &str) -> Result<bool> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        Ok(sessions.remove(session_id).is_some())
    }
}

/// Generate a fresh session id.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Multi-turn driver over a [`Workflow`] and a [`SessionStore`].
///
/// Different session ids may be driven concurrently. A single id expects one
/// turn at a time: the store lock is not held across the model call, so two
/// overlapping turns on one id both start from the same history and the
/// later save wins.
pub struct ChatSession {
    workflow: Workflow,
    store: Arc<dyn SessionStore>,
    template: ConversationState,
}

impl ChatSession {
    pub fn new(workflow: Workflow, store: Arc<dyn SessionStore>) -> Self {
        Self {
            workflow,
            store,
            template: ConversationState::new(),
        }
    }

    /// State new sessions start from (survey answers, credential).
    pub fn with_template(mut self, template: ConversationState) -> Self {
        self.template = template;
        self
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Run one turn for `session_id` and persist the resulting state.
    ///
    /// Workflow faults never surface here; only store failures do. Callers
    /// must not overlap two `send`s for the same `session_id`.
    pub async fn send(&self, session_id: &str, text: impl Into<String>) -> Result<RunReport> {
        let mut state = match self.store.load(session_id)? {
            Some(state) => state,
            None => {
                debug!(session_id, "starting new session");
                self.template.clone()
            }
        };
        state.push_user(text);

        let report = self.workflow.invoke(state).await;
        self.store.save(session_id, &report.state)?;
        Ok(report)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("workflow", &self.workflow)
            .finish_non_exhaustive()
    }
}
