// frontend/src/update.rs
//
use crate::error::ValidationError;
use crate::messages::{Command, Message};
use crate::network::UploadSource;
use crate::reducers::{chat, upload};
use crate::state::ChatState;

/// Apply one message to the state, pushing any side effects onto `cmds`.
///
/// Returns `Ok(true)` when the view must be re-rendered, `Ok(false)` when
/// the DOM already reflects the change, and the validation error when the
/// input was rejected (commands may still have been queued, e.g. a toast).
pub fn update<F: UploadSource>(
    state: &mut ChatState,
    msg: Message<F>,
    cmds: &mut Vec<Command<F>>,
) -> Result<bool, ValidationError> {
    match msg {
        Message::UpdateInputText(text) => {
            // The field already shows this value.
            state.input_text = text;
            Ok(false)
        }
        Message::SubmitNewMessage(text) => chat::submit_new_message(state, &text, cmds).map(|()| true),
        Message::ChatReplyReceived(reply) => Ok(chat::settle_success(state, &reply)),
        Message::ChatRequestFailed(error) => Ok(chat::settle_failure(state, &error)),
        Message::SubmitFile(file) => upload::submit_file(state, file, cmds).map(|()| true),
        Message::UploadSucceeded { file_name, receipt } => {
            upload::upload_succeeded(state, file_name, receipt, cmds);
            Ok(true)
        }
        Message::UploadFailed { file_name, error } => {
            upload::upload_failed(state, &file_name, &error, cmds);
            Ok(true)
        }
    }
}
