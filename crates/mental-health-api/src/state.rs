use anyhow::Result;
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::info;

use crate::config::{Credentials, Settings};
use crate::logging::RunTracer;
use crate::services::conversation::ConversationStore;
use crate::services::{GeminiService, LlmProvider, MentalHealthAgent, TracedLlm};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<MentalHealthAgent>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(agent: Arc<MentalHealthAgent>, settings: Settings) -> Self {
        Self { agent, settings }
    }

    /// Wire Gemini, the run tracer and the conversation store into an agent.
    /// Must be called inside a Tokio runtime (the tracer spawns its workers).
    pub fn from_settings(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let gemini = GeminiService::new(settings.llm.clone(), credentials.google_api_key.clone())?;
        let tracer = RunTracer::new(
            settings.tracing_sink.clone(),
            credentials.langsmith_api_key.clone(),
        )?;
        let tracing_enabled = tracer.is_enabled();

        let llm: Arc<dyn LlmProvider> = Arc::new(TracedLlm::new(
            Arc::new(gemini),
            tracer,
            settings.llm.model.clone(),
            settings.llm.temperature,
        ));
        info!(
            "✅ LLM gateway ready (model={}, temperature={}, run_tracing={})",
            settings.llm.model, settings.llm.temperature, tracing_enabled
        );

        let store = ConversationStore::new(settings.conversation.max_turns);
        let agent = Arc::new(MentalHealthAgent::new(llm, store));

        Ok(Self::new(agent, settings))
    }
}

impl FromRef<AppState> for Arc<MentalHealthAgent> {
    fn from_ref(state: &AppState) -> Self {
        state.agent.clone()
    }
}
