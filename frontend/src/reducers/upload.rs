//! Upload controller.  Independent of the conversation log: it only touches
//! the upload fields of `ChatState` and emits notifications.

use crate::constants::{INVALID_FILE_PROMPT, PDF_MEDIA_TYPE, UPLOAD_FAILED_FALLBACK, UPLOAD_SUCCESS};
use crate::error::{TransportError, ValidationError};
use crate::messages::Command;
use crate::models::{UploadReceipt, UploadedDocument};
use crate::network::UploadSource;
use crate::state::ChatState;
use crate::toast::ToastKind;

pub fn validate_file<F: UploadSource>(file: Option<F>) -> Result<F, ValidationError> {
    match file {
        Some(file) if file.media_type() == PDF_MEDIA_TYPE => Ok(file),
        _ => Err(ValidationError::InvalidFileType),
    }
}

pub fn submit_file<F: UploadSource>(
    state: &mut ChatState,
    file: Option<F>,
    cmds: &mut Vec<Command<F>>,
) -> Result<(), ValidationError> {
    let file = match validate_file(file) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("Rejected upload: {}", e);
            cmds.push(Command::notify(ToastKind::Error, INVALID_FILE_PROMPT));
            return Err(e);
        }
    };

    log::info!("Uploading {}", file.file_name());
    state.uploads_in_flight += 1;
    cmds.push(Command::UploadFile(file));
    Ok(())
}

pub fn upload_succeeded<F>(
    state: &mut ChatState,
    file_name: String,
    receipt: UploadReceipt,
    cmds: &mut Vec<Command<F>>,
) {
    state.uploads_in_flight = state.uploads_in_flight.saturating_sub(1);
    log::info!("Uploaded {} to {} ({})", file_name, receipt.path, receipt.message);
    state.last_upload = Some(UploadedDocument {
        file_name,
        path: receipt.path,
    });
    cmds.push(Command::notify(ToastKind::Success, UPLOAD_SUCCESS));
}

pub fn upload_failed<F>(
    state: &mut ChatState,
    file_name: &str,
    error: &TransportError,
    cmds: &mut Vec<Command<F>>,
) {
    state.uploads_in_flight = state.uploads_in_flight.saturating_sub(1);
    log::error!("Upload of {} failed: {}", file_name, error);
    cmds.push(Command::notify(
        ToastKind::Error,
        error.user_message(UPLOAD_FAILED_FALLBACK),
    ));
}
