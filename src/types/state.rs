//! The record threaded through the workflow.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::{latest_user_message, Message};
use super::profile::{SurveyAnswers, UserProfile};

/// Opaque model credential carried by a conversation.
///
/// Never printed and never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// State of one conversation run.
///
/// Messages are only ever appended; [`ConversationState::push`] is the sole
/// mutator of the sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationState {
    messages: Vec<Message>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<SurveyAnswers>,
    #[serde(skip)]
    credential: Option<Credential>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state with an initial message list.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_survey(mut self, survey: SurveyAnswers) -> Self {
        self.survey = Some(survey);
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Message::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.push(Message::assistant(text));
    }

    pub fn latest_user_message(&self) -> Option<&str> {
        latest_user_message(&self.messages)
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Consume the state, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
