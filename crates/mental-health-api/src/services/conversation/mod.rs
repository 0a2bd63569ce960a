//! Conversation memory management module
//!
//! In-memory, per-user conversation histories backed by DashMap.

mod store;
pub mod types;

pub use store::{ConversationStore, StoreError};
pub use types::{ConversationHistory, ConversationTurn};
