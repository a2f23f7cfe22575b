use std::collections::VecDeque;
use std::time::SystemTime;

use crate::foundation::error::{PatchError, PatchResult};

/// One pending token award waiting for its planting animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PledgeEvent {
    /// Tokens committed to the total when the animation finishes (always > 0).
    pub tokens_awarded: u64,
    /// Wall-clock time the event entered the queue.
    pub enqueued_at: SystemTime,
}

impl PledgeEvent {
    /// Validate a raw award. Zero and negative awards never enter the animation machine.
    pub fn new(tokens: i64) -> PatchResult<Self> {
        if tokens <= 0 {
            return Err(PatchError::validation(format!(
                "pledge award must be > 0 tokens, got {tokens}"
            )));
        }
        Ok(Self {
            tokens_awarded: tokens as u64,
            enqueued_at: SystemTime::now(),
        })
    }
}

/// FIFO of pledge events. Events are never reordered or dropped.
#[derive(Debug, Default)]
pub struct PledgeQueue {
    events: VecDeque<PledgeEvent>,
}

impl PledgeQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an award.
    pub fn push(&mut self, tokens: i64) -> PatchResult<PledgeEvent> {
        let ev = PledgeEvent::new(tokens)?;
        self.events.push_back(ev);
        Ok(ev)
    }

    /// Take the oldest event.
    pub fn pop(&mut self) -> Option<PledgeEvent> {
        self.events.pop_front()
    }

    /// Number of waiting events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of tokens not yet animated.
    pub fn pending_tokens(&self) -> u64 {
        self.events.iter().map(|e| e.tokens_awarded).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pledge/queue.rs"]
mod tests;
