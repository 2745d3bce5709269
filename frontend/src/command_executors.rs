use futures::FutureExt;

use crate::app::ChatApp;
use crate::error::TransportError;
use crate::messages::{Command, Message};
use crate::models::ChatReply;
use crate::network::{SessionProvider, TransportClient, UploadSource};

pub(crate) fn execute_command<T: TransportClient + 'static>(app: &ChatApp<T>, cmd: Command<T::File>) {
    match cmd {
        Command::SendChatMessage { text } => {
            let app_clone = app.clone();
            app.host().spawn(
                async move {
                    let msg = match send_chat_message(app_clone.sessions(), app_clone.transport(), &text).await {
                        Ok(reply) => Message::ChatReplyReceived(reply),
                        Err(e) => Message::ChatRequestFailed(e),
                    };
                    if let Err(e) = app_clone.dispatch(msg) {
                        log::warn!("Executor: chat result rejected: {}", e);
                    }
                }
                .boxed_local(),
            );
        }
        Command::UploadFile(file) => {
            let app_clone = app.clone();
            app.host().spawn(
                async move {
                    let file_name = file.file_name();
                    let msg = match app_clone.transport().send_file(&file).await {
                        Ok(receipt) => Message::UploadSucceeded { file_name, receipt },
                        Err(error) => Message::UploadFailed { file_name, error },
                    };
                    if let Err(e) = app_clone.dispatch(msg) {
                        log::warn!("Executor: upload result rejected: {}", e);
                    }
                }
                .boxed_local(),
            );
        }
        Command::Notify { kind, message } => app.host().notify(kind, &message),
    }
}

// Session first, then the message itself.  Any failure settles the cycle.
async fn send_chat_message<T: TransportClient + 'static>(
    sessions: &SessionProvider<T>,
    transport: &T,
    text: &str,
) -> Result<ChatReply, TransportError> {
    let session = sessions.ensure_session().await?;
    log::debug!("Executor: sending message in session {}", session);
    transport.send_message(&session, text).await
}
