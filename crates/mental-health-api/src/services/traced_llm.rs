use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::logging::{RunRecord, RunTracer, RunType};
use crate::models::chat::ChatMessage;
use crate::services::llm_service::{LlmError, LlmProvider};

/// Reports every call of the wrapped provider to the run tracer.
/// The caller always sees the inner result unchanged.
pub struct TracedLlm {
    inner: Arc<dyn LlmProvider>,
    tracer: RunTracer,
    run_name: String,
    model: String,
    temperature: f32,
}

impl TracedLlm {
    pub fn new(
        inner: Arc<dyn LlmProvider>,
        tracer: RunTracer,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            inner,
            tracer,
            run_name: "ChatGoogleGenerativeAI".to_string(),
            model: model.into(),
            temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for TracedLlm {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, LlmError> {
        let started = Utc::now();
        let result = self.inner.complete(messages).await;

        let builder = RunRecord::builder(self.run_name.as_str(), RunType::Llm)
            .messages(messages)
            .model(&self.model, self.temperature)
            .started_at(started)
            .ended_at(Utc::now());

        let run = match &result {
            Ok(reply) => builder.output(reply),
            Err(e) => builder.error(e.to_string()),
        };
        self.tracer.record(run.build());

        result
    }
}
