use std::cell::RefCell;

use serde::Serialize;

use crate::app::ChatApp;
use crate::conversation::ConversationLog;
use crate::error::ValidationError;
use crate::messages::Message;
use crate::models::{Turn, UploadedDocument};
use crate::network::ApiClient;

/// Explicit form of the "loading" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// How the most recent submission cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Failure,
}

// Widget state, owned by one `ChatApp`
#[derive(Debug, Default)]
pub struct ChatState {
    pub(crate) conversation: ConversationLog,
    pub(crate) submission: SubmissionPhase,
    pub(crate) last_settlement: Option<Settlement>,
    // Current value of the input field
    pub(crate) input_text: String,
    pub(crate) last_upload: Option<UploadedDocument>,
    pub(crate) uploads_in_flight: usize,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        self.submission
    }

    pub fn last_settlement(&self) -> Option<Settlement> {
        self.last_settlement
    }

    /// Pending submission flag.  The explicit phase and the log tail are
    /// kept in step by the reducer; either one blocks new submissions.
    pub fn is_loading(&self) -> bool {
        self.submission == SubmissionPhase::Submitting || self.conversation.has_pending_turn()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn last_upload(&self) -> Option<&UploadedDocument> {
        self.last_upload.as_ref()
    }

    pub fn last_uploaded_filename(&self) -> Option<&str> {
        self.last_upload.as_ref().map(|doc| doc.file_name.as_str())
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads_in_flight > 0
    }

    pub fn show_welcome(&self) -> bool {
        self.conversation.is_empty()
    }

    pub fn snapshot(&self) -> ChatSnapshot<'_> {
        ChatSnapshot {
            turns: self.turns(),
            loading: self.is_loading(),
            last_uploaded: self.last_uploaded_filename(),
        }
    }
}

/// Read-only view handed to JS.
#[derive(Serialize, Debug)]
pub struct ChatSnapshot<'a> {
    pub turns: &'a [Turn],
    pub loading: bool,
    pub last_uploaded: Option<&'a str>,
}

// The mounted widget lives in a thread_local, like every other piece of
// browser glue: event closures reach it through `dispatch_global_message`.
thread_local! {
    static BROWSER_APP: RefCell<Option<ChatApp<ApiClient>>> = RefCell::new(None);
}

pub fn install_app(app: ChatApp<ApiClient>) {
    BROWSER_APP.with(|cell| *cell.borrow_mut() = Some(app));
}

pub fn with_app<R>(f: impl FnOnce(&ChatApp<ApiClient>) -> R) -> Option<R> {
    // Clone out so the thread_local is not borrowed while the app runs.
    let app = BROWSER_APP.with(|cell| cell.borrow().clone());
    app.as_ref().map(f)
}

// Global helper for DOM event handlers
pub fn dispatch_global_message(msg: Message<web_sys::File>) -> Result<(), ValidationError> {
    with_app(|app| app.dispatch(msg)).unwrap_or_else(|| {
        log::warn!("Chat widget not mounted; dropping message");
        Ok(())
    })
}
