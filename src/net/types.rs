//! Wire DTOs for the hosted identity provider's auth API.
//!
//! DESIGN
//! ======
//! Field names follow the provider's JSON so serde round-trips stay lossless.
//! Unknown fields are ignored; the view only needs identity and profile data.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Profile attributes the identity provider copies from the OAuth account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Display name reported by the OAuth provider.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Avatar image URL reported by the OAuth provider.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// An authenticated user as returned by `GET /auth/v1/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Primary identity email, if the provider shared one.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// A signed-in session. Token fields are carried but never refreshed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Kind of session change delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// OAuth identity providers the sign-in flow can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    /// Identifier sent as the `provider` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }

    /// Human-readable provider name for button copy and alerts.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
        }
    }
}
