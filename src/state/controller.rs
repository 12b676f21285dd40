//! Lifecycle and actions for one mounted sign-up / sign-out screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionController` ties an injected `AuthService` to one `ViewStore`.
//! `mount` resets the state, subscribes to session changes and loads the
//! current snapshot; `unmount` drops the subscription. The page calls both
//! and spawns the async actions on the local executor.
//!
//! TEARDOWN
//! ========
//! Requests are never cancelled. Every write is tagged with the epoch of the
//! mount that started it and skipped unless that mount is still live, so a
//! response or notification that lands after `unmount` (or after a remount)
//! changes nothing.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use super::session::ViewState;
use super::store::ViewStore;
use crate::net::auth::{AuthChangeHandler, AuthService};
use crate::net::subscription::Subscription;
use crate::net::types::{AuthChangeEvent, OAuthProvider, Session};
use crate::util::feedback::Feedback;
use crate::util::sync::lock;

/// The single identity provider offered on the sign-up screen.
pub const SIGN_UP_PROVIDER: OAuthProvider = OAuthProvider::Google;

/// Alert shown when the OAuth flow could not be started.
pub const SIGN_UP_FAILED_ALERT: &str = "Error signing in with Google";

#[derive(Default)]
struct Lifecycle {
    epoch: u64,
    mounted: bool,
    subscription: Option<Subscription>,
}

struct Inner<V> {
    auth: Arc<dyn AuthService>,
    feedback: Arc<dyn Feedback>,
    store: V,
    lifecycle: Mutex<Lifecycle>,
}

impl<V: ViewStore> Inner<V> {
    fn is_current(&self, epoch: u64) -> bool {
        let lc = lock(&self.lifecycle);
        lc.mounted && lc.epoch == epoch
    }

    /// Apply `f` only while the mount identified by `epoch` is live.
    ///
    /// The lifecycle lock is held across the write so `unmount` cannot
    /// interleave between the check and the mutation.
    fn write_if_current(&self, epoch: u64, f: impl FnOnce(&mut ViewState)) -> bool {
        let lc = lock(&self.lifecycle);
        if !(lc.mounted && lc.epoch == epoch) {
            return false;
        }
        self.store.write(f)
    }
}

pub struct SessionController<V: ViewStore> {
    inner: Arc<Inner<V>>,
}

impl<V: ViewStore> Clone for SessionController<V> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<V: ViewStore> SessionController<V> {
    pub fn new(auth: Arc<dyn AuthService>, feedback: Arc<dyn Feedback>, store: V) -> Self {
        Self {
            inner: Arc::new(Inner { auth, feedback, store, lifecycle: Mutex::new(Lifecycle::default()) }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &V {
        &self.inner.store
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.inner.store.read()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        lock(&self.inner.lifecycle).mounted
    }

    /// Reset state and subscribe to session changes.
    ///
    /// The subscription is live when this returns. The returned future loads
    /// the initial session snapshot and must be driven by the caller.
    pub fn mount(&self) -> impl Future<Output = ()> + use<V> {
        let epoch = self.attach();
        let this = self.clone();
        async move { this.load_initial_session(epoch).await }
    }

    /// Drop the session-change subscription. Safe to call repeatedly.
    pub fn unmount(&self) {
        let subscription = {
            let mut lc = lock(&self.inner.lifecycle);
            lc.mounted = false;
            lc.subscription.take()
        };
        if let Some(mut subscription) = subscription {
            subscription.unsubscribe();
            tracing::debug!("session view unsubscribed");
        }
    }

    /// Start the OAuth sign-in flow with [`SIGN_UP_PROVIDER`].
    ///
    /// Failures are logged and surfaced with one blocking alert.
    pub async fn sign_up(&self) {
        let Some(epoch) = self.begin_action() else {
            return;
        };
        if let Err(err) = self.inner.auth.sign_in_with_oauth(SIGN_UP_PROVIDER).await {
            self.inner.feedback.diagnostic("oauth sign-in failed", &err);
            if self.inner.is_current(epoch) {
                self.inner.feedback.alert(SIGN_UP_FAILED_ALERT);
            }
        }
        self.finish_action(epoch);
    }

    /// End the session. On success the user is cleared right away rather
    /// than waiting for the `SIGNED_OUT` notification.
    pub async fn sign_out(&self) {
        let Some(epoch) = self.begin_action() else {
            return;
        };
        match self.inner.auth.sign_out().await {
            Ok(()) => {
                self.inner.write_if_current(epoch, |s| s.current_user = None);
            }
            Err(err) => self.inner.feedback.diagnostic("sign-out failed", &err),
        }
        self.finish_action(epoch);
    }

    fn attach(&self) -> u64 {
        let (epoch, previous) = {
            let mut lc = lock(&self.inner.lifecycle);
            let previous = lc.subscription.take();
            lc.epoch += 1;
            lc.mounted = true;
            self.inner.store.write(|s| *s = ViewState::default());
            (lc.epoch, previous)
        };
        drop(previous);

        // Subscribe outside the lock: a service may notify from inside
        // `on_auth_state_change`, and the handler takes the lock itself.
        let subscription = self.inner.auth.on_auth_state_change(change_handler(&self.inner, epoch));
        let stale = {
            let mut lc = lock(&self.inner.lifecycle);
            if lc.mounted && lc.epoch == epoch {
                lc.subscription = Some(subscription);
                None
            } else {
                Some(subscription)
            }
        };
        drop(stale);

        tracing::debug!(epoch, "session view mounted");
        epoch
    }

    async fn load_initial_session(&self, epoch: u64) {
        match self.inner.auth.get_session().await {
            Ok(session) => {
                if !self.inner.write_if_current(epoch, |s| s.apply_session(session.as_ref())) {
                    tracing::debug!(epoch, "initial session arrived after teardown");
                }
            }
            Err(err) => self.inner.feedback.diagnostic("failed to get session", &err),
        }
    }

    fn begin_action(&self) -> Option<u64> {
        let lc = lock(&self.inner.lifecycle);
        if !lc.mounted {
            return None;
        }
        let mut started = false;
        self.inner.store.write(|s| started = s.try_begin_action());
        started.then_some(lc.epoch)
    }

    fn finish_action(&self, epoch: u64) {
        self.inner.write_if_current(epoch, ViewState::finish_action);
    }
}

/// Session-change listener for the mount identified by `epoch`.
///
/// Holds only a `Weak` so an outstanding subscription never keeps a torn-down
/// controller alive.
fn change_handler<V: ViewStore>(inner: &Arc<Inner<V>>, epoch: u64) -> AuthChangeHandler {
    let weak: Weak<Inner<V>> = Arc::downgrade(inner);
    Arc::new(move |event: AuthChangeEvent, session: Option<&Session>| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if inner.write_if_current(epoch, |s| s.apply_session(session)) {
            tracing::debug!(?event, signed_in = session.is_some(), "session view updated");
        }
    })
}
