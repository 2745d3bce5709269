//! Conversation store: the ordered turn log and its three mutation
//! primitives.
//!
//! Turns are only ever appended.  The assistant placeholder created by
//! [`ConversationLog::append_exchange`] is later settled in place, either by
//! [`ConversationLog::resolve_last_assistant_turn`] or by
//! [`ConversationLog::fail_last_assistant_turn`].

use crate::constants::{GENERIC_FAILURE, NO_RESPONSE_FALLBACK};
use crate::error::PrecondViolation;
use crate::models::{Role, Turn};
use serde::Serialize;

#[derive(Clone, Default, Serialize, Debug)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// True iff the last turn is an assistant turn still awaiting its result.
    pub fn has_pending_turn(&self) -> bool {
        self.last()
            .map_or(false, |turn| turn.role == Role::Assistant && turn.pending)
    }

    /// Append the user's turn followed by a pending assistant placeholder.
    ///
    /// `user_text` must already be trimmed and non-empty; the submission
    /// controller guarantees that as well as the absence of another pending
    /// turn.
    pub fn append_exchange(&mut self, user_text: &str) {
        debug_assert!(!user_text.trim().is_empty());
        debug_assert!(!self.has_pending_turn());

        self.turns.push(Turn::user(user_text));
        self.turns.push(Turn::placeholder());
    }

    /// Settle the placeholder with the assistant's reply.
    pub fn resolve_last_assistant_turn(&mut self, result_text: &str) -> Result<(), PrecondViolation> {
        let turn = self.pending_tail_mut()?;
        turn.content = if result_text.is_empty() {
            NO_RESPONSE_FALLBACK.to_string()
        } else {
            result_text.to_string()
        };
        turn.pending = false;
        Ok(())
    }

    /// Settle the placeholder as failed.  The turn stays in history.
    pub fn fail_last_assistant_turn(&mut self) -> Result<(), PrecondViolation> {
        let turn = self.pending_tail_mut()?;
        turn.content = GENERIC_FAILURE.to_string();
        turn.pending = false;
        turn.failed = true;
        Ok(())
    }

    fn pending_tail_mut(&mut self) -> Result<&mut Turn, PrecondViolation> {
        let turn = self.turns.last_mut().ok_or(PrecondViolation::EmptyLog)?;
        if turn.role != Role::Assistant {
            return Err(PrecondViolation::NotAssistantTurn);
        }
        if !turn.pending {
            return Err(PrecondViolation::NotPending);
        }
        Ok(turn)
    }
}
