use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::{ChatMessage, Role};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Transport failure, non-success status or unreadable body.
    #[error("LLM provider error: {0}")]
    Provider(String),

    /// The provider answered, but not with an agent-authored message.
    #[error("Unexpected LLM response kind: {0:?}")]
    UnexpectedResponseKind(Role),
}

/// Text-completion capability: role-tagged messages in, one agent message out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, LlmError>;
}

/// Accepts only agent-authored replies.
pub fn expect_agent_reply(reply: ChatMessage) -> Result<ChatMessage, LlmError> {
    match reply.role {
        Role::Agent => Ok(reply),
        other => Err(LlmError::UnexpectedResponseKind(other)),
    }
}
