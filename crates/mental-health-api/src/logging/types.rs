use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::chat::ChatMessage;

/// Run categories understood by the tracing sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    Llm,
}

/// One traced call, shaped for the LangSmith runs API.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub name: String,
    pub run_type: RunType,
    pub inputs: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_name: String,
    pub extra: Value,
}

impl RunRecord {
    pub fn builder(name: impl Into<String>, run_type: RunType) -> RunRecordBuilder {
        RunRecordBuilder::new(name, run_type)
    }
}

/// Builder pattern for RunRecord
pub struct RunRecordBuilder {
    record: RunRecord,
}

impl RunRecordBuilder {
    pub fn new(name: impl Into<String>, run_type: RunType) -> Self {
        let now = Utc::now();
        Self {
            record: RunRecord {
                id: Uuid::new_v4(),
                name: name.into(),
                run_type,
                inputs: json!({}),
                outputs: None,
                error: None,
                start_time: now,
                end_time: now,
                session_name: String::new(),
                extra: json!({}),
            },
        }
    }

    pub fn messages(mut self, messages: &[ChatMessage]) -> Self {
        self.record.inputs = json!({ "messages": messages });
        self
    }

    pub fn output(mut self, message: &ChatMessage) -> Self {
        self.record.outputs = Some(json!({
            "generations": [{ "text": message.content, "message": message }]
        }));
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.record.error = Some(error.into());
        self
    }

    pub fn started_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.record.start_time = start_time;
        self
    }

    pub fn ended_at(mut self, end_time: DateTime<Utc>) -> Self {
        self.record.end_time = end_time;
        self
    }

    pub fn model(mut self, model: &str, temperature: f32) -> Self {
        self.record.extra = json!({
            "metadata": { "ls_model_name": model, "ls_temperature": temperature }
        });
        self
    }

    pub fn build(self) -> RunRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_record_serializes_without_error() {
        let record = RunRecord::builder("gemini", RunType::Llm)
            .messages(&[ChatMessage::human("hi")])
            .output(&ChatMessage::agent("hello"))
            .model("gemini-1.5-flash", 0.7)
            .build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["run_type"], "llm");
        assert_eq!(value["inputs"]["messages"][0]["role"], "user");
        assert_eq!(value["outputs"]["generations"][0]["text"], "hello");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_record_has_no_outputs() {
        let record = RunRecord::builder("gemini", RunType::Llm)
            .error("timeout")
            .build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["error"], "timeout");
        assert!(value.get("outputs").is_none());
    }
}
