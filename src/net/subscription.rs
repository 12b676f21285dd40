//! Session-change subscriptions.
//!
//! DESIGN
//! ======
//! `subscribe(handler)` returns a `Subscription` token. Unsubscribing takes the
//! cancel closure out of an `Option`, so calling it twice (or dropping after an
//! explicit unsubscribe) is a no-op. The registry hands out tokens holding a
//! `Weak` back-reference, so a token outliving its client never keeps it alive.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use super::auth::AuthChangeHandler;
use super::types::{AuthChangeEvent, Session};
use crate::util::sync::lock;

type CancelFn = Box<dyn FnOnce() + Send + Sync>;

/// Handle for a registered session-change listener.
pub struct Subscription {
    cancel: Option<CancelFn>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A handle that is already inactive.
    #[must_use]
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Remove the listener. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, AuthChangeHandler)>,
}

/// Fan-out of session changes to every live listener.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<Listeners>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: AuthChangeHandler) -> Subscription {
        let id = {
            let mut listeners = lock(&self.inner);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, handler));
            id
        };
        let weak: Weak<Mutex<Listeners>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `event` to all listeners registered at the time of the call.
    ///
    /// Handlers run outside the lock so they may subscribe or unsubscribe.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let handlers: Vec<AuthChangeHandler> =
            lock(&self.inner).entries.iter().map(|(_, h)| Arc::clone(h)).collect();
        tracing::debug!(?event, listeners = handlers.len(), "auth state change");
        for handler in handlers {
            handler(event, session);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry").field("listeners", &self.len()).finish()
    }
}
