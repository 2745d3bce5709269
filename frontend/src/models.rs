use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Turn is one entry of the conversation log.
///
/// Fields are only writable from `crate::conversation`, which enforces the
/// pending/failed invariants.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct Turn {
    pub(crate) role: Role,
    pub(crate) content: String,
    pub(crate) pending: bool,
    pub(crate) failed: bool,
}

impl Turn {
    pub(crate) fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            pending: false,
            failed: false,
        }
    }

    /// Empty assistant turn awaiting its network result.
    pub(crate) fn placeholder() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            pending: true,
            failed: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

/// Opaque correlator between this run and server-side session state.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful result of a message submission.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ChatReply {
    pub text: String,
}

/// Successful result of a file submission, as returned by `/upload`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct UploadReceipt {
    pub message: String,
    pub path: String,
}

/// The most recent successful upload.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct UploadedDocument {
    pub file_name: String,
    pub path: String,
}

// Wire payloads for the `/chat` endpoint

#[derive(Serialize, Debug)]
pub struct ApiChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct ApiChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl From<ApiChatResponse> for ChatReply {
    fn from(body: ApiChatResponse) -> Self {
        Self {
            text: body.response.unwrap_or_default(),
        }
    }
}
