use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::chat::{ChatMessage, PatientProfile, UserId};
use crate::services::conversation::{ConversationStore, StoreError};
use crate::services::llm_service::{LlmError, LlmProvider};
use crate::services::prompt_builder::{build_query_prompt, build_report_prompt_for};

pub const CLOSING_PHRASE: &str = " 💖 Feel free to ask me anything, I'm here for you!";
pub const QUERY_FALLBACK: &str = "Oops, something went wrong. Let me try again. 💔";
pub const REPORT_FALLBACK: &str = "Failed to generate the health report. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Failed to answer query: {0}")]
    Query(LlmError),

    #[error("Failed to generate health report: {0}")]
    Report(LlmError),
}

impl AgentError {
    /// User-facing text shown in place of the failed answer.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::Query(_) => QUERY_FALLBACK,
            Self::Report(_) => REPORT_FALLBACK,
        }
    }
}

pub struct MentalHealthAgent {
    llm: Arc<dyn LlmProvider>,
    store: ConversationStore,
}

impl MentalHealthAgent {
    pub fn new(llm: Arc<dyn LlmProvider>, store: ConversationStore) -> Self {
        Self { llm, store }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Answer a supportive query and record the exchange in the user's history.
    pub async fn answer_user_query(
        &self,
        user_id: &UserId,
        user_name: &str,
        query: &str,
    ) -> Result<String, AgentError> {
        self.store.ensure(user_id);

        let prompt = build_query_prompt(user_name, query);
        let reply = self
            .llm
            .complete(&[ChatMessage::human(prompt.as_str())])
            .await
            .map_err(AgentError::Query)?;

        let content = reply.content.trim().to_string();

        match self.store.append_turn(user_id, prompt, content.as_str()) {
            Ok(turns) => debug!("User {} now has {} turns", user_id, turns),
            // Cleared while the provider call was in flight; the clear wins.
            Err(StoreError::UnknownUser(_)) => {
                warn!("History for user {} cleared mid-request, turn not recorded", user_id)
            }
        }

        Ok(format!("{}{}", content, CLOSING_PHRASE))
    }

    /// Produce a report from transient patient details. Nothing is stored.
    pub async fn generate_health_report(
        &self,
        profile: &PatientProfile,
    ) -> Result<String, AgentError> {
        let prompt = build_report_prompt_for(profile);
        let reply = self
            .llm
            .complete(&[ChatMessage::human(prompt)])
            .await
            .map_err(AgentError::Report)?;

        Ok(reply.content.trim().to_string())
    }

    pub fn clear_conversation(&self, user_id: &UserId) {
        if self.store.delete(user_id) {
            info!("Cleared conversation for user {}", user_id);
        } else {
            debug!("No conversation to clear for user {}", user_id);
        }
    }
}
