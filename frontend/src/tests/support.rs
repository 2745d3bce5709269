//! Test doubles for the transport, picked files and the host environment.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::app::Host;
use crate::error::TransportError;
use crate::models::{ChatReply, SessionHandle, UploadReceipt};
use crate::network::{TransportClient, UploadSource};
use crate::state::ChatState;
use crate::toast::ToastKind;

type Outcome<R> = Result<R, TransportError>;

enum Scripted<R> {
    Now(Outcome<R>),
    Later(oneshot::Receiver<Outcome<R>>),
}

struct Script<R> {
    queue: RefCell<VecDeque<Scripted<R>>>,
}

impl<R> Default for Script<R> {
    fn default() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }
}

impl<R> Script<R> {
    fn push(&self, outcome: Outcome<R>) {
        self.queue.borrow_mut().push_back(Scripted::Now(outcome));
    }

    fn hold(&self) -> oneshot::Sender<Outcome<R>> {
        let (tx, rx) = oneshot::channel();
        self.queue.borrow_mut().push_back(Scripted::Later(rx));
        tx
    }

    /// Next scripted outcome, or `default` when nothing is queued.
    async fn next(&self, default: impl FnOnce() -> R) -> Outcome<R> {
        let scripted = self.queue.borrow_mut().pop_front();
        match scripted {
            Some(Scripted::Now(outcome)) => outcome,
            Some(Scripted::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("held response dropped".into()))),
            None => Ok(default()),
        }
    }
}

/// Scriptable in-memory transport.
///
/// Every operation succeeds with a canned value unless an outcome was
/// queued (`queue_*`) or a held response was registered (`hold_*`), in
/// which case the call waits until the returned sender fires.
#[derive(Default)]
pub struct MockTransport {
    sessions: Script<SessionHandle>,
    replies: Script<ChatReply>,
    uploads: Script<UploadReceipt>,
    session_requests: Cell<usize>,
    message_calls: RefCell<Vec<(SessionHandle, String)>>,
    file_calls: RefCell<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_session(&self, outcome: Outcome<SessionHandle>) {
        self.sessions.push(outcome);
    }

    pub fn hold_session(&self) -> oneshot::Sender<Outcome<SessionHandle>> {
        self.sessions.hold()
    }

    pub fn queue_message(&self, outcome: Outcome<ChatReply>) {
        self.replies.push(outcome);
    }

    pub fn hold_message(&self) -> oneshot::Sender<Outcome<ChatReply>> {
        self.replies.hold()
    }

    pub fn queue_file(&self, outcome: Outcome<UploadReceipt>) {
        self.uploads.push(outcome);
    }

    pub fn hold_file(&self) -> oneshot::Sender<Outcome<UploadReceipt>> {
        self.uploads.hold()
    }

    pub fn session_requests(&self) -> usize {
        self.session_requests.get()
    }

    pub fn message_calls(&self) -> Vec<(SessionHandle, String)> {
        self.message_calls.borrow().clone()
    }

    pub fn file_calls(&self) -> Vec<String> {
        self.file_calls.borrow().clone()
    }
}

impl TransportClient for MockTransport {
    type File = MockFile;

    async fn create_session(&self) -> Result<SessionHandle, TransportError> {
        let n = self.session_requests.get() + 1;
        self.session_requests.set(n);
        self.sessions.next(|| SessionHandle::new(format!("session-{n}"))).await
    }

    async fn send_message(
        &self,
        session: &SessionHandle,
        text: &str,
    ) -> Result<ChatReply, TransportError> {
        self.message_calls
            .borrow_mut()
            .push((session.clone(), text.to_string()));
        self.replies
            .next(|| ChatReply {
                text: format!("echo: {text}"),
            })
            .await
    }

    async fn send_file(&self, file: &MockFile) -> Result<UploadReceipt, TransportError> {
        self.file_calls.borrow_mut().push(file.name.clone());
        let name = file.name.clone();
        self.uploads
            .next(|| UploadReceipt {
                message: "PDF uploaded successfully.".into(),
                path: format!("backend/docs/{name}"),
            })
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    pub name: String,
    pub media_type: String,
}

impl MockFile {
    pub fn new(name: &str, media_type: &str) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
        }
    }

    pub fn pdf(name: &str) -> Self {
        Self::new(name, "application/pdf")
    }
}

impl UploadSource for MockFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// Host that runs tasks on a `LocalPool` and records what the widget
/// asked the environment to do.
#[derive(Clone)]
pub struct TestHost {
    spawner: LocalSpawner,
    notifications: Rc<RefCell<Vec<(ToastKind, String)>>>,
    renders: Rc<Cell<usize>>,
}

impl TestHost {
    pub fn new(spawner: LocalSpawner) -> Self {
        Self {
            spawner,
            notifications: Rc::default(),
            renders: Rc::default(),
        }
    }

    pub fn notifications(&self) -> Vec<(ToastKind, String)> {
        self.notifications.borrow().clone()
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }
}

impl Host for TestHost {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(task) {
            panic!("test executor shut down: {e:?}");
        }
    }

    fn notify(&self, kind: ToastKind, message: &str) {
        self.notifications.borrow_mut().push((kind, message.to_string()));
    }

    fn render(&self, _state: &ChatState) {
        self.renders.set(self.renders.get() + 1);
    }
}
