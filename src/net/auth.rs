//! Authentication service contract consumed by the session view.
//!
//! SYSTEM CONTEXT
//! ==============
//! The view never talks HTTP directly. It holds an injected `AuthService`
//! (provided through Leptos context) so tests can swap in a fake and the
//! composing application owns the real client's lifecycle.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure collapses to one `AuthError` carrying the provider's
//! human-readable message. Callers log it and move on.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use super::subscription::Subscription;
use super::types::{AuthChangeEvent, OAuthProvider, Session};

/// A remote auth call failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Build an error from a non-success HTTP response.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::new(status_message(status, body))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Prefer the provider's `msg`/`error_description` field when the body is JSON.
fn status_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|v| {
        ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_owned))
    });
    match detail {
        Some(msg) => format!("auth request failed: {status}: {msg}"),
        None if body.trim().is_empty() => format!("auth request failed: {status}"),
        None => format!("auth request failed: {status}: {}", body.trim()),
    }
}

/// Listener invoked on every session change with the new session, if any.
pub type AuthChangeHandler = Arc<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

/// Operations the session view needs from the hosted identity provider.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait AuthService: Send + Sync {
    /// Current session snapshot, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider could not be reached.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register `handler` for session changes until the returned handle is
    /// unsubscribed or dropped.
    fn on_auth_state_change(&self, handler: AuthChangeHandler) -> Subscription;

    /// Start an OAuth sign-in flow with `provider`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the flow could not be started.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<(), AuthError>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejected the request.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
