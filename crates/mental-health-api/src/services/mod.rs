pub mod agent;
pub mod conversation;
pub mod gemini;
pub mod llm_service;
pub mod prompt_builder;
pub mod traced_llm;

pub use agent::{AgentError, MentalHealthAgent};
pub use gemini::GeminiService;
pub use llm_service::{LlmError, LlmProvider};
pub use traced_llm::TracedLlm;
