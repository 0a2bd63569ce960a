use serde::{Deserialize, Serialize};
use std::fmt;

// ===== LLM MESSAGES =====

/// Author of a message exchanged with the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    Human,
    #[serde(rename = "assistant")]
    Agent,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

// ===== IDENTIFIERS =====

/// Opaque key of one caller's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier, used when the caller sends none.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== REQUEST MODELS =====

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<FieldValue>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthReportRequest {
    #[serde(default)]
    pub user_name: Option<FieldValue>,
    #[serde(default)]
    pub age: Option<FieldValue>,
    #[serde(default)]
    pub gender: Option<FieldValue>,
    #[serde(default)]
    pub medical_history: Option<FieldValue>,
    #[serde(default)]
    pub current_medications: Option<FieldValue>,
}

#[derive(Debug, Deserialize)]
pub struct ClearConversationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A scalar JSON field rendered verbatim into a prompt (`"age": 34` or `"age": "34"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
            Self::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Transient patient details for report generation; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientProfile {
    pub user_name: String,
    pub age: String,
    pub gender: String,
    pub medical_history: String,
    pub current_medications: String,
}

// ===== RESPONSE MODELS =====

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReportResponse {
    pub report: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&ChatMessage::human("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);

        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert_eq!(msg.role, Role::Agent);
    }

    #[test]
    fn test_field_value_renders_numbers_and_text() {
        let req: HealthReportRequest = serde_json::from_str(
            r#"{"user_name":"Bob","age":42,"gender":"male","medical_history":"","current_medications":"none"}"#,
        )
        .unwrap();

        assert_eq!(req.age.unwrap().to_string(), "42");
        assert_eq!(req.user_name.unwrap().to_string(), "Bob");
        assert_eq!(req.medical_history.unwrap().to_string(), "");
    }

    #[test]
    fn test_user_name_accepts_the_same_scalars_on_both_requests() {
        let ask: AskRequest =
            serde_json::from_str(r#"{"user_name":7,"query":"hello"}"#).unwrap();
        let report: HealthReportRequest = serde_json::from_str(r#"{"user_name":7}"#).unwrap();

        assert_eq!(ask.user_name, report.user_name);
        assert_eq!(ask.user_name.unwrap().to_string(), "7");
    }

    #[test]
    fn test_generated_user_ids_differ() {
        assert_ne!(UserId::generate(), UserId::generate());
    }
}
