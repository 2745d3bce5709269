//! The widget runtime: owns the state, runs the reducer and hands the
//! resulting commands to the executor.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::command_executors::execute_command;
use crate::error::ValidationError;
use crate::messages::{Command, Message};
use crate::models::SessionHandle;
use crate::network::{SessionProvider, TransportClient};
use crate::state::ChatState;
use crate::toast::ToastKind;
use crate::update::update;

/// Everything the runtime needs from its environment.
///
/// The browser implementation spawns on the JS microtask queue, shows
/// toasts and re-renders the DOM; tests use a local executor and record
/// what happened.
pub trait Host {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn notify(&self, kind: ToastKind, message: &str);
    fn render(&self, state: &ChatState);
}

pub struct ChatApp<T> {
    inner: Rc<AppInner<T>>,
}

struct AppInner<T> {
    state: RefCell<ChatState>,
    transport: Rc<T>,
    sessions: SessionProvider<T>,
    host: Box<dyn Host>,
}

impl<T> Clone for ChatApp<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: TransportClient + 'static> ChatApp<T> {
    pub fn new(transport: T, host: impl Host + 'static) -> Self {
        let transport = Rc::new(transport);
        Self {
            inner: Rc::new(AppInner {
                state: RefCell::new(ChatState::new()),
                sessions: SessionProvider::new(Rc::clone(&transport)),
                transport,
                host: Box::new(host),
            }),
        }
    }

    /// Run `msg` through the reducer, re-render if needed, then execute the
    /// queued commands.  The state borrow is released before any of the
    /// host callbacks run.
    pub fn dispatch(&self, msg: Message<T::File>) -> Result<(), ValidationError> {
        let mut commands: Vec<Command<T::File>> = Vec::new();
        let outcome = {
            let mut state = self.inner.state.borrow_mut();
            update(&mut state, msg, &mut commands)
        };

        if let Ok(true) = outcome {
            self.render();
        }
        for command in commands {
            execute_command(self, command);
        }
        outcome.map(|_| ())
    }

    pub fn submit_new_message(&self, text: impl Into<String>) -> Result<(), ValidationError> {
        self.dispatch(Message::SubmitNewMessage(text.into()))
    }

    pub fn submit_file(&self, file: Option<T::File>) -> Result<(), ValidationError> {
        self.dispatch(Message::SubmitFile(file))
    }

    pub fn set_input_text(&self, text: impl Into<String>) {
        // Input updates are never rejected.
        let _ = self.dispatch(Message::UpdateInputText(text.into()));
    }

    pub fn render(&self) {
        self.inner.host.render(&self.inner.state.borrow());
    }

    pub fn state(&self) -> Ref<'_, ChatState> {
        self.inner.state.borrow()
    }

    pub fn session(&self) -> Option<SessionHandle> {
        self.inner.sessions.current()
    }

    pub(crate) fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub(crate) fn sessions(&self) -> &SessionProvider<T> {
        &self.inner.sessions
    }

    pub(crate) fn host(&self) -> &dyn Host {
        self.inner.host.as_ref()
    }
}
