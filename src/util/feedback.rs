//! Failure reporting for the session screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two channels: `diagnostic` writes to the log and is never shown to the
//! user; `alert` interrupts the user with a blocking message. Only a failed
//! sign-up uses the latter.

use crate::net::auth::AuthError;

pub trait Feedback: Send + Sync {
    /// Record a failed remote call on the diagnostic channel.
    fn diagnostic(&self, context: &str, err: &AuthError);

    /// Show a blocking, user-visible message.
    fn alert(&self, message: &str);
}

/// Logs both channels through `tracing`. Used in headless hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn diagnostic(&self, context: &str, err: &AuthError) {
        tracing::error!(error = %err, "{context}");
    }

    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "user alert");
    }
}

/// Logs diagnostics and raises `window.alert` for alerts.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserFeedback;

#[cfg(feature = "csr")]
impl Feedback for BrowserFeedback {
    fn diagnostic(&self, context: &str, err: &AuthError) {
        tracing::error!(error = %err, "{context}");
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
