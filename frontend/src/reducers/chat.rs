//! Submission controller: `Idle -> Submitting -> Settled -> Idle`.
//!
//! The network half lives in `command_executors.rs`; everything here is a
//! pure state transition so it can be driven from tests without a browser.

use crate::error::{TransportError, ValidationError};
use crate::messages::Command;
use crate::models::ChatReply;
use crate::state::{ChatState, Settlement, SubmissionPhase};

/// Trimmed text if a new submission may start right now.
pub fn accept_message(state: &ChatState, text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if state.is_loading() {
        return Err(ValidationError::SubmissionPending);
    }
    Ok(trimmed.to_string())
}

/// `Idle -> Submitting`.  Rejections leave the state untouched and are not
/// shown to the user.
pub fn submit_new_message<F>(
    state: &mut ChatState,
    text: &str,
    cmds: &mut Vec<Command<F>>,
) -> Result<(), ValidationError> {
    let text = accept_message(state, text).map_err(|e| {
        log::debug!("Ignoring submission: {}", e);
        e
    })?;

    // User turn first, so it renders before the request even starts.
    state.conversation.append_exchange(&text);
    state.input_text.clear();
    state.submission = SubmissionPhase::Submitting;
    state.last_settlement = None;

    cmds.push(Command::SendChatMessage { text });
    Ok(())
}

/// `Submitting -> Settled(Success) -> Idle`.  Returns whether the log changed.
pub fn settle_success(state: &mut ChatState, reply: &ChatReply) -> bool {
    match state.conversation.resolve_last_assistant_turn(&reply.text) {
        Ok(()) => {
            finish(state, Settlement::Success);
            true
        }
        Err(violation) => {
            log::error!("Dropping chat reply: {}", violation);
            false
        }
    }
}

/// `Submitting -> Settled(Failure) -> Idle`.  The detailed error only goes
/// to the log; the turn gets the generic failure text.
pub fn settle_failure(state: &mut ChatState, error: &TransportError) -> bool {
    log::error!("Chat submission failed: {}", error);
    match state.conversation.fail_last_assistant_turn() {
        Ok(()) => {
            finish(state, Settlement::Failure);
            true
        }
        Err(violation) => {
            log::error!("Cannot mark turn as failed: {}", violation);
            false
        }
    }
}

fn finish(state: &mut ChatState, settlement: Settlement) {
    state.submission = SubmissionPhase::Idle;
    state.last_settlement = Some(settlement);
}
