use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::types::{ConversationHistory, ConversationTurn};
use crate::models::chat::UserId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No conversation history for user {0}")]
    UnknownUser(UserId),
}

/// Thread-safe in-memory conversation store.
///
/// Every operation is atomic per user (DashMap shard lock). Nothing is persisted.
#[derive(Clone)]
pub struct ConversationStore {
    /// user_id -> history
    storage: Arc<DashMap<UserId, ConversationHistory>>,

    max_turns: usize,
}

impl ConversationStore {
    pub fn new(max_turns: usize) -> Self {
        info!(
            "Initializing conversation store (max_turns={})",
            if max_turns == 0 { "unbounded".to_string() } else { max_turns.to_string() }
        );
        Self {
            storage: Arc::new(DashMap::new()),
            max_turns,
        }
    }

    /// Make sure the user has a history, without copying it out.
    pub fn ensure(&self, user_id: &UserId) {
        self.storage.entry(user_id.clone()).or_insert_with(|| {
            debug!("Created conversation history for user {}", user_id);
            ConversationHistory::new()
        });
    }

    /// Snapshot of the user's history, creating an empty one if absent.
    pub fn get_or_create(&self, user_id: &UserId) -> ConversationHistory {
        let entry = self.storage.entry(user_id.clone()).or_insert_with(|| {
            debug!("Created conversation history for user {}", user_id);
            ConversationHistory::new()
        });
        entry.value().clone()
    }

    /// Snapshot of the user's history, if any.
    pub fn get(&self, user_id: &UserId) -> Option<ConversationHistory> {
        self.storage.get(user_id).map(|entry| entry.value().clone())
    }

    /// Append a turn to an existing history; returns the new number of turns.
    pub fn append_turn(
        &self,
        user_id: &UserId,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<usize, StoreError> {
        let mut entry = self
            .storage
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.clone()))?;

        entry.push(ConversationTurn::new(input, output), self.max_turns);
        let len = entry.len();
        debug!("Appended turn for user {} (turns={})", user_id, len);
        Ok(len)
    }

    /// Remove the user's history; returns whether one existed.
    pub fn delete(&self, user_id: &UserId) -> bool {
        let removed = self.storage.remove(user_id).is_some();
        if removed {
            debug!("Deleted conversation history for user {}", user_id);
        }
        removed
    }

    /// Number of users with a live history
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Turns held across all users
    pub fn total_turns(&self) -> usize {
        self.storage.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(0)
    }
}
