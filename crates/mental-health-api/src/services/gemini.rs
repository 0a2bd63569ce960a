use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LlmConfig;
use crate::models::chat::ChatMessage;
use crate::services::llm_service::{expect_agent_reply, LlmError, LlmProvider};

/// Gemini chat completions through the OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    config: LlmConfig,
    api_key: String,
}

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

impl GeminiService {
    pub fn new(config: LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmProvider for GeminiService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, LlmError> {
        debug!(
            "Calling Gemini model={} with {} messages",
            self.config.model,
            messages.len()
        );

        let request = OpenAiChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Provider(format!("Gemini Network Error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider(format!(
                "Gemini API Error ({}): {}",
                status, text
            )));
        }

        let body: OpenAiChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Provider(format!("Failed to parse Gemini response: {}", e)))?;

        let reply = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::Provider("Gemini returned no choices".to_string()))?;

        expect_agent_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> GeminiService {
        let config = LlmConfig {
            base_url: server.uri(),
            ..LlmConfig::default()
        };
        GeminiService::new(config, "test-key".to_string()).unwrap()
    }

    fn completion(role: &str, content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "index": 0, "message": { "role": role, "content": content }, "finish_reason": "stop" }
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_returns_agent_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("test-key"))
            .and(body_partial_json(json!({
                "model": "gemini-1.5-flash",
                "temperature": 0.7,
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("assistant", "Hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let reply = service_for(&server)
            .complete(&[ChatMessage::human("hello")])
            .await
            .unwrap();

        assert_eq!(reply, ChatMessage::agent("Hi there"));
    }

    #[tokio::test]
    async fn test_non_agent_reply_is_unexpected_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("user", "echo")))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .complete(&[ChatMessage::human("hello")])
            .await
            .unwrap_err();

        assert_eq!(err, LlmError::UnexpectedResponseKind(Role::Human));
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .complete(&[ChatMessage::human("hello")])
            .await
            .unwrap_err();

        match err {
            LlmError::Provider(msg) => assert!(msg.contains("500")),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("assistant", "late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = LlmConfig {
            base_url: server.uri(),
            timeout_seconds: 1,
            ..LlmConfig::default()
        };
        let err = GeminiService::new(config, "test-key".to_string())
            .unwrap()
            .complete(&[ChatMessage::human("hello")])
            .await
            .unwrap_err();

        match err {
            LlmError::Provider(msg) => assert!(msg.starts_with("Gemini Network Error")),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .complete(&[ChatMessage::human("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Provider(_)));
    }
}
