//! View state for the sign-up / sign-out screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ViewState` is a read-only projection of whatever session the identity
//! provider last reported, plus a busy flag for in-flight actions. Writers
//! replace `current_user` wholesale; the latest write wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{Session, User};

/// Profile fields the screen renders for a signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Option<Self> {
        session.map(|s| Self::from(&s.user))
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.user_metadata.full_name.clone(),
            avatar_url: user.user_metadata.avatar_url.clone(),
        }
    }
}

/// Per-instance screen state. Reset whenever the screen is remounted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current_user: Option<CurrentUser>,
    pub is_busy: bool,
}

impl ViewState {
    /// Replace the current user with the user of `session` (or none).
    pub fn apply_session(&mut self, session: Option<&Session>) {
        self.current_user = CurrentUser::from_session(session);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Mark an action in flight. Returns `false` if one already is.
    pub fn try_begin_action(&mut self) -> bool {
        if self.is_busy {
            return false;
        }
        self.is_busy = true;
        true
    }

    pub fn finish_action(&mut self) {
        self.is_busy = false;
    }

    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        match &self.current_user {
            Some(user) => Screen::Authenticated { user, busy: self.is_busy },
            None => Screen::Unauthenticated { busy: self.is_busy },
        }
    }
}

/// What the screen shows, derived only from `(current_user, is_busy)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen<'a> {
    /// Profile card with a sign-out button.
    Authenticated { user: &'a CurrentUser, busy: bool },
    /// Sign-up button.
    Unauthenticated { busy: bool },
}

impl Screen<'_> {
    #[must_use]
    pub fn busy(&self) -> bool {
        match self {
            Self::Authenticated { busy, .. } | Self::Unauthenticated { busy } => *busy,
        }
    }
}
