// frontend/src/messages.rs
//
// The events that can occur in the widget, and the side effects the
// reducer asks for in response.
//
use crate::error::TransportError;
use crate::models::{ChatReply, UploadReceipt};
use crate::toast::ToastKind;

/// `F` is the transport's file type (`web_sys::File` in the browser).
#[derive(Debug)]
pub enum Message<F> {
    // Input handling
    UpdateInputText(String),             // Mirror the input field value

    // Submission controller
    SubmitNewMessage(String),            // User pressed Enter / Send
    ChatReplyReceived(ChatReply),        // Transport resolved
    ChatRequestFailed(TransportError),   // Session or transport failed

    // Upload controller
    SubmitFile(Option<F>),               // File picked (None when the picker was emptied)
    UploadSucceeded {
        file_name: String,
        receipt: UploadReceipt,
    },
    UploadFailed {
        file_name: String,
        error: TransportError,
    },
}

/// Commands represent side effects that should be executed after state updates.
/// This separates pure state changes from network calls and notifications.
#[derive(Debug)]
pub enum Command<F> {
    /// Ensure a session, then send the message
    SendChatMessage { text: String },

    /// Upload a validated PDF
    UploadFile(F),

    /// Show a toast
    Notify { kind: ToastKind, message: String },
}

impl<F> Command<F> {
    /// Helper to create a Notify command
    pub fn notify(kind: ToastKind, message: impl Into<String>) -> Self {
        Command::Notify {
            kind,
            message: message.into(),
        }
    }
}
