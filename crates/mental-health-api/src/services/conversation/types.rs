use std::collections::VecDeque;

/// One round of an exchange: the prompt sent and the text received.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub input: String,
    pub output: String,
}

impl ConversationTurn {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Ordered turns for one user, oldest first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,

    /// Turns dropped by the window since creation
    pub evicted_turns: usize,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self {
            turns: VecDeque::new(),
            evicted_turns: 0,
        }
    }

    /// Append, dropping the oldest turns beyond `max_turns` (0 = unbounded).
    pub fn push(&mut self, turn: ConversationTurn, max_turns: usize) {
        self.turns.push_back(turn);
        if max_turns > 0 {
            while self.turns.len() > max_turns {
                self.turns.pop_front();
                self.evicted_turns += 1;
            }
        }
    }

    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_drops_oldest() {
        let mut history = ConversationHistory::new();
        for i in 0..4 {
            history.push(ConversationTurn::new(format!("in{}", i), format!("out{}", i)), 3);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.evicted_turns, 1);
        let inputs: Vec<_> = history.turns().map(|t| t.input.as_str()).collect();
        assert_eq!(inputs, vec!["in1", "in2", "in3"]);
    }

    #[test]
    fn test_zero_means_unbounded() {
        let mut history = ConversationHistory::new();
        for i in 0..200 {
            history.push(ConversationTurn::new(i.to_string(), i.to_string()), 0);
        }
        assert_eq!(history.len(), 200);
        assert_eq!(history.evicted_turns, 0);
    }
}
