//! Single-resolution guard for callback-driven logins
//!
//! A vendor SDK reports completion through callbacks it may invoke from any thread,
//! possibly more than once, possibly after the caller stopped waiting. [`pending`]
//! pairs a [`Resolver`] handed to those callbacks with the receiver the caller awaits.
//! The resolver lets exactly one callback claim the right to answer; every later
//! attempt is refused.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;

/// Callback-side handle of a pending operation
pub struct Resolver<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

/// Create a pending operation
#[must_use]
pub fn pending<T>() -> (Resolver<T>, oneshot::Receiver<T>) {
    let (sender, receiver) = oneshot::channel();
    let resolver = Resolver {
        slot: Arc::new(Mutex::new(Some(sender))),
    };
    (resolver, receiver)
}

impl<T> Resolver<T> {
    /// Take the exclusive right to resolve
    ///
    /// Returns `None` if another callback already claimed it. A claimed sender whose
    /// receiver is gone is still returned; check [`oneshot::Sender::is_closed`] before
    /// doing further work on its behalf.
    pub fn claim(&self) -> Option<oneshot::Sender<T>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Claim and deliver in one step
    ///
    /// Returns `true` only if the value reached a caller that is still waiting.
    pub fn resolve(&self, value: T) -> bool {
        self.claim()
            .is_some_and(|sender| sender.send(value).is_ok())
    }

    /// True while unclaimed and the caller is still waiting
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }
}
