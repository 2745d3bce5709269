//! Session identity provider.
//!
//! Guarantees a [`SessionHandle`] exists before a message reaches the
//! transport.  The *in-flight* creation request is memoized, not only the
//! resolved handle, so concurrent callers never race-create two sessions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use super::transport::TransportClient;
use crate::error::TransportError;
use crate::models::SessionHandle;

type SessionRequest = Shared<LocalBoxFuture<'static, Result<SessionHandle, TransportError>>>;

enum SessionSlot {
    Absent,
    Creating { attempt: u64, request: SessionRequest },
    Ready(SessionHandle),
}

pub struct SessionProvider<T> {
    transport: Rc<T>,
    slot: Rc<RefCell<SessionSlot>>,
    next_attempt: Rc<Cell<u64>>,
}

impl<T> Clone for SessionProvider<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            slot: Rc::clone(&self.slot),
            next_attempt: Rc::clone(&self.next_attempt),
        }
    }
}

impl<T: TransportClient + 'static> SessionProvider<T> {
    pub fn new(transport: Rc<T>) -> Self {
        Self {
            transport,
            slot: Rc::new(RefCell::new(SessionSlot::Absent)),
            next_attempt: Rc::new(Cell::new(1)),
        }
    }

    /// The resolved handle, if creation already completed.
    pub fn current(&self) -> Option<SessionHandle> {
        match &*self.slot.borrow() {
            SessionSlot::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Return the existing handle or join/start the single creation request.
    ///
    /// A failed creation empties the slot again, so the next submission
    /// cycle gets a fresh attempt.
    pub async fn ensure_session(&self) -> Result<SessionHandle, TransportError> {
        let (attempt, request) = {
            let mut slot = self.slot.borrow_mut();
            let in_flight = match &*slot {
                SessionSlot::Ready(handle) => return Ok(handle.clone()),
                SessionSlot::Creating { attempt, request } => Some((*attempt, request.clone())),
                SessionSlot::Absent => None,
            };
            if let Some(in_flight) = in_flight {
                in_flight
            } else {
                let attempt = self.next_attempt.get();
                self.next_attempt.set(attempt + 1);
                log::debug!("Creating chat session (attempt {})", attempt);

                let transport = Rc::clone(&self.transport);
                let request = async move { transport.create_session().await }
                    .boxed_local()
                    .shared();
                *slot = SessionSlot::Creating {
                    attempt,
                    request: request.clone(),
                };
                (attempt, request)
            }
        };

        let result = request.await;
        self.settle(attempt, &result);
        result
    }

    fn settle(&self, attempt: u64, result: &Result<SessionHandle, TransportError>) {
        let mut slot = self.slot.borrow_mut();
        // Only the waiter of the attempt still on record may settle it.
        let is_current = matches!(&*slot, SessionSlot::Creating { attempt: a, .. } if *a == attempt);
        if !is_current {
            return;
        }
        match result {
            Ok(handle) => {
                log::info!("Chat session {} ready", handle);
                *slot = SessionSlot::Ready(handle.clone());
            }
            Err(e) => {
                log::warn!("Chat session creation failed: {}", e);
                *slot = SessionSlot::Absent;
            }
        }
    }
}
