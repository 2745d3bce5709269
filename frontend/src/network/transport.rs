//! Boundary between the controllers and the backend.
//!
//! The controllers only depend on success being distinguishable from
//! failure and on failures carrying an inspectable payload; the wire
//! format is owned by the implementation (see `api_client.rs`).

use crate::error::TransportError;
use crate::models::{ChatReply, SessionHandle, UploadReceipt};

/// What the upload controller needs to know about a picked file.
pub trait UploadSource {
    fn file_name(&self) -> String;
    fn media_type(&self) -> String;
}

impl UploadSource for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn media_type(&self) -> String {
        self.type_()
    }
}

/// Network operations consumed by the core.
///
/// Futures are `!Send`: everything runs on the browser's single thread.
#[allow(async_fn_in_trait)]
pub trait TransportClient {
    type File: UploadSource + 'static;

    async fn create_session(&self) -> Result<SessionHandle, TransportError>;

    async fn send_message(
        &self,
        session: &SessionHandle,
        text: &str,
    ) -> Result<ChatReply, TransportError>;

    async fn send_file(&self, file: &Self::File) -> Result<UploadReceipt, TransportError>;
}
