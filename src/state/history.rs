use crate::types::{ApiMessage, Role};
use std::collections::VecDeque;

pub const MAX_TURNS: usize = 100;

/// One completed user/assistant exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    user: String,
    assistant: String,
}

impl Turn {
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }
}

/// Bounded conversation history, oldest turn first.
///
/// Appending at capacity evicts the oldest turn before the new one is
/// pushed, so `len() <= capacity()` always holds.
#[derive(Debug, Clone)]
pub struct History {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_TURNS)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Store a finished turn, returning the evicted one when at capacity.
    pub fn append(&mut self, user: impl Into<String>, assistant: impl Into<String>) -> Option<Turn> {
        let evicted = if self.turns.len() >= self.capacity {
            self.turns.pop_front()
        } else {
            None
        };
        self.turns.push_back(Turn {
            user: user.into(),
            assistant: assistant.into(),
        });
        evicted
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Turns in display order, numbered from 1.
    pub fn render(&self) -> impl Iterator<Item = (usize, &Turn)> + '_ {
        self.turns.iter().enumerate().map(|(idx, turn)| (idx + 1, turn))
    }

    /// Alternating user/assistant messages, oldest first.
    pub fn as_messages(&self) -> impl Iterator<Item = ApiMessage<'_>> + '_ {
        self.turns.iter().flat_map(|turn| {
            [
                ApiMessage {
                    role: Role::User,
                    content: turn.user.as_str(),
                },
                ApiMessage {
                    role: Role::Assistant,
                    content: turn.assistant.as_str(),
                },
            ]
        })
    }
}
