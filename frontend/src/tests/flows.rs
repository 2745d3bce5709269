//! End-to-end flows through `ChatApp`: reducer, executor and transport
//! together, driven on a `LocalPool` instead of the browser event loop.

use futures::executor::LocalPool;

use super::support::{MockFile, MockTransport, TestHost};
use crate::app::ChatApp;
use crate::error::{TransportError, ValidationError};
use crate::models::{ChatReply, Role, SessionHandle, UploadReceipt};
use crate::state::{Settlement, SubmissionPhase};
use crate::toast::ToastKind;

struct Harness {
    pool: LocalPool,
    host: TestHost,
    app: ChatApp<MockTransport>,
}

impl Harness {
    fn new(transport: MockTransport) -> Self {
        let pool = LocalPool::new();
        let host = TestHost::new(pool.spawner());
        let app = ChatApp::new(transport, host.clone());
        Self { pool, host, app }
    }

    fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    fn transport(&self) -> &MockTransport {
        self.app.transport()
    }

    fn contents(&self) -> Vec<(Role, String)> {
        self.app
            .state()
            .turns()
            .iter()
            .map(|t| (t.role(), t.content().to_string()))
            .collect()
    }
}

fn reply(text: &str) -> Result<ChatReply, TransportError> {
    Ok(ChatReply { text: text.into() })
}

#[test]
fn message_round_trip() {
    let transport = MockTransport::new();
    transport.queue_message(reply("Hi there"));
    let mut h = Harness::new(transport);

    h.app.submit_new_message("Hello").unwrap();
    {
        let state = h.app.state();
        assert!(state.is_loading());
        assert_eq!(state.turns().len(), 2);
        assert!(state.turns()[1].is_pending());
    }

    h.settle();

    assert_eq!(
        h.contents(),
        vec![(Role::User, "Hello".to_string()), (Role::Assistant, "Hi there".to_string())]
    );
    let state = h.app.state();
    assert!(!state.is_loading());
    assert!(!state.turns()[1].is_pending());
    assert_eq!(state.submission_phase(), SubmissionPhase::Idle);
    assert_eq!(state.last_settlement(), Some(Settlement::Success));
    assert_eq!(h.transport().message_calls(), vec![(SessionHandle::new("session-1"), "Hello".to_string())]);
}

#[test]
fn server_error_becomes_generic_failure_turn() {
    let transport = MockTransport::new();
    transport.queue_message(Err(TransportError::Status {
        status: 500,
        body: r#"{"error": "boom"}"#.into(),
    }));
    let mut h = Harness::new(transport);

    h.app.submit_new_message("Hello").unwrap();
    h.settle();

    let state = h.app.state();
    let last = &state.turns()[1];
    assert_eq!(last.content(), "Something went wrong.");
    assert!(last.is_failed());
    assert!(!last.is_pending());
    assert!(!state.is_loading());
    assert_eq!(state.last_settlement(), Some(Settlement::Failure));
    assert!(h.host.notifications().is_empty());
}

#[test]
fn empty_reply_uses_fallback_text() {
    let transport = MockTransport::new();
    transport.queue_message(reply(""));
    let mut h = Harness::new(transport);

    h.app.submit_new_message("Hello").unwrap();
    h.settle();

    assert_eq!(h.app.state().turns()[1].content(), "No response received.");
    assert!(!h.app.state().turns()[1].is_failed());
}

#[test]
fn blank_input_is_ignored() {
    let mut h = Harness::new(MockTransport::new());

    assert_eq!(h.app.submit_new_message("   \n\t"), Err(ValidationError::EmptyMessage));
    h.settle();

    assert!(h.app.state().turns().is_empty());
    assert!(h.app.state().show_welcome());
    assert_eq!(h.transport().session_requests(), 0);
    assert_eq!(h.host.renders(), 0);
}

#[test]
fn back_to_back_submissions_append_one_exchange() {
    let transport = MockTransport::new();
    let release = transport.hold_message();
    let mut h = Harness::new(transport);

    h.app.submit_new_message("first").unwrap();
    assert_eq!(h.app.submit_new_message("second"), Err(ValidationError::SubmissionPending));
    h.settle();
    assert_eq!(h.app.submit_new_message("third"), Err(ValidationError::SubmissionPending));
    assert_eq!(h.app.state().turns().len(), 2);

    release.send(reply("done")).unwrap();
    h.settle();

    assert_eq!(h.transport().message_calls().len(), 1);
    h.app.submit_new_message("second").unwrap();
    h.settle();
    assert_eq!(h.app.state().turns().len(), 4);
    assert_eq!(h.app.state().turns()[3].content(), "echo: second");
}

#[test]
fn session_is_created_once_and_reused() {
    let mut h = Harness::new(MockTransport::new());

    h.app.submit_new_message("one").unwrap();
    h.settle();
    h.app.submit_new_message("two").unwrap();
    h.settle();

    assert_eq!(h.transport().session_requests(), 1);
    let sessions: Vec<_> = h.transport().message_calls().into_iter().map(|(s, _)| s).collect();
    assert_eq!(sessions, vec![SessionHandle::new("session-1"), SessionHandle::new("session-1")]);
    assert_eq!(h.app.session(), Some(SessionHandle::new("session-1")));
}

#[test]
fn failed_session_creation_settles_and_is_retried() {
    let transport = MockTransport::new();
    transport.queue_session(Err(TransportError::Network("offline".into())));
    let mut h = Harness::new(transport);

    h.app.submit_new_message("Hello").unwrap();
    h.settle();

    assert!(h.transport().message_calls().is_empty());
    assert!(h.app.state().turns()[1].is_failed());
    assert!(!h.app.state().is_loading());
    assert_eq!(h.app.session(), None);

    h.app.submit_new_message("again").unwrap();
    h.settle();

    assert_eq!(h.transport().session_requests(), 2);
    assert_eq!(h.app.state().turns()[3].content(), "echo: again");
    assert_eq!(h.app.session(), Some(SessionHandle::new("session-2")));
}

#[test]
fn non_pdf_upload_never_reaches_transport() {
    let mut h = Harness::new(MockTransport::new());

    let rejected = h.app.submit_file(Some(MockFile::new("notes.txt", "text/plain")));
    h.settle();

    assert_eq!(rejected, Err(ValidationError::InvalidFileType));
    assert!(h.transport().file_calls().is_empty());
    assert_eq!(
        h.host.notifications(),
        vec![(ToastKind::Error, "Please select a valid PDF file.".to_string())]
    );
    assert_eq!(h.app.state().last_uploaded_filename(), None);
}

#[test]
fn pdf_upload_records_last_uploaded_file() {
    let mut h = Harness::new(MockTransport::new());

    h.app.submit_file(Some(MockFile::pdf("policy.pdf"))).unwrap();
    h.settle();

    assert_eq!(h.transport().file_calls(), vec!["policy.pdf".to_string()]);
    let state = h.app.state();
    assert_eq!(state.last_uploaded_filename(), Some("policy.pdf"));
    assert_eq!(state.last_upload().unwrap().path, "backend/docs/policy.pdf");
    assert!(!state.is_uploading());
    assert!(state.turns().is_empty());
    assert_eq!(
        h.host.notifications(),
        vec![(ToastKind::Success, "PDF uploaded successfully!".to_string())]
    );
}

#[test]
fn rejected_upload_shows_server_message() {
    let transport = MockTransport::new();
    transport.queue_file(Err(TransportError::Status {
        status: 400,
        body: r#"{"error": "Invalid file type. Only PDF allowed."}"#.into(),
    }));
    let mut h = Harness::new(transport);

    h.app.submit_file(Some(MockFile::pdf("fake.pdf"))).unwrap();
    h.settle();

    assert_eq!(h.app.state().last_uploaded_filename(), None);
    assert_eq!(
        h.host.notifications(),
        vec![(ToastKind::Error, "Invalid file type. Only PDF allowed.".to_string())]
    );
}

#[test]
fn upload_runs_alongside_pending_submission() {
    let transport = MockTransport::new();
    let release_reply = transport.hold_message();
    let release_upload = transport.hold_file();
    let mut h = Harness::new(transport);

    h.app.submit_new_message("Hello").unwrap();
    h.app.submit_file(Some(MockFile::pdf("policy.pdf"))).unwrap();
    h.settle();
    assert!(h.app.state().is_loading());
    assert!(h.app.state().is_uploading());

    release_upload
        .send(Ok(UploadReceipt {
            message: "PDF uploaded successfully.".into(),
            path: "backend/docs/policy.pdf".into(),
        }))
        .unwrap();
    h.settle();

    {
        let state = h.app.state();
        assert_eq!(state.last_uploaded_filename(), Some("policy.pdf"));
        assert!(state.is_loading());
        assert!(state.turns()[1].is_pending());
    }

    release_reply.send(reply("Hi there")).unwrap();
    h.settle();

    assert_eq!(
        h.contents(),
        vec![(Role::User, "Hello".to_string()), (Role::Assistant, "Hi there".to_string())]
    );
    assert!(!h.app.state().is_loading());
}

#[test]
fn input_text_mirrors_field_without_rendering() {
    let mut h = Harness::new(MockTransport::new());

    h.app.set_input_text("draft");
    h.settle();
    assert_eq!(h.app.state().input_text(), "draft");
    assert_eq!(h.host.renders(), 0);

    h.app.submit_new_message("draft").unwrap();
    assert_eq!(h.app.state().input_text(), "");
    assert_eq!(h.host.renders(), 1);
}
