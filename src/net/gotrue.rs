//! HTTP client for the hosted identity provider's `/auth/v1` REST API.
//!
//! Implements [`AuthService`] for the application. Sessions live in memory
//! only; persistence and token refresh stay with the provider.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors and non-success statuses become [`AuthError`] with the
//! provider's message. Sign-out treats 401/403/404 as "already signed out"
//! and still clears the local session.

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod gotrue_test;

use std::sync::{Arc, Mutex};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::auth::{AuthChangeHandler, AuthError, AuthService};
use super::subscription::{ListenerRegistry, Subscription};
use super::types::{AuthChangeEvent, OAuthProvider, Session, User};
use crate::config::AuthConfig;
use crate::util::sync::lock;

/// Sends the browser (or a test double) to an OAuth authorize URL.
pub type RedirectFn = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

pub struct GoTrueClient {
    config: AuthConfig,
    http: reqwest::Client,
    session: Mutex<Option<Session>>,
    listeners: ListenerRegistry,
    redirect: RedirectFn,
}

impl GoTrueClient {
    /// Build a client for `config`, using `redirect` to start OAuth flows.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the HTTP client cannot be constructed.
    pub fn new(config: AuthConfig, redirect: RedirectFn) -> Result<Self, AuthError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
        let http = builder.build()?;
        Ok(Self { config, http, session: Mutex::new(None), listeners: ListenerRegistry::new(), redirect })
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Adopt the session behind `access_token` after an OAuth redirect lands.
    ///
    /// Fetches the user for the token and notifies listeners with `SIGNED_IN`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejects the token.
    pub async fn set_session_from_access_token(
        &self,
        access_token: &str,
        expires_in: Option<u64>,
    ) -> Result<Session, AuthError> {
        let resp = self
            .http
            .get(self.config.auth_endpoint("user"))
            .headers(auth_headers(&self.config.anon_key, Some(access_token))?)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::from_status(status.as_u16(), &body));
        }
        let user: User = resp.json().await?;
        let session = Session {
            access_token: access_token.to_owned(),
            token_type: "bearer".to_owned(),
            expires_in,
            user,
        };
        tracing::info!(user_id = %session.user.id, "session established");
        self.replace_session(Some(session.clone()), AuthChangeEvent::SignedIn);
        Ok(session)
    }

    fn current_session(&self) -> Option<Session> {
        lock(&self.session).clone()
    }

    fn replace_session(&self, session: Option<Session>, event: AuthChangeEvent) {
        *lock(&self.session) = session.clone();
        self.listeners.emit(event, session.as_ref());
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl AuthService for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.current_session())
    }

    fn on_auth_state_change(&self, handler: AuthChangeHandler) -> Subscription {
        self.listeners.subscribe(handler)
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<(), AuthError> {
        let url = authorize_url(&self.config, provider)?;
        tracing::info!(provider = provider.as_str(), "starting oauth sign-in");
        (self.redirect)(&url).map_err(AuthError::new)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.current_session() else {
            self.replace_session(None, AuthChangeEvent::SignedOut);
            return Ok(());
        };

        let resp = self
            .http
            .post(self.config.auth_endpoint("logout"))
            .headers(auth_headers(&self.config.anon_key, Some(&session.access_token))?)
            .send()
            .await?;
        let status = resp.status().as_u16();
        if !(resp.status().is_success() || is_session_gone_status(status)) {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::from_status(status, &body));
        }

        tracing::info!(user_id = %session.user.id, "signed out");
        self.replace_session(None, AuthChangeEvent::SignedOut);
        Ok(())
    }
}

/// `{url}/auth/v1/authorize?provider=..[&redirect_to=..]`
pub(crate) fn authorize_url(config: &AuthConfig, provider: OAuthProvider) -> Result<String, AuthError> {
    let mut params = vec![("provider", provider.as_str())];
    if let Some(redirect_to) = config.redirect_to.as_deref() {
        params.push(("redirect_to", redirect_to));
    }
    reqwest::Url::parse_with_params(&config.auth_endpoint("authorize"), &params)
        .map(String::from)
        .map_err(|e| AuthError::new(format!("invalid authorize url: {e}")))
}

fn auth_headers(anon_key: &str, access_token: Option<&str>) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    headers.insert("apikey", header_value(anon_key)?);
    if let Some(token) = access_token {
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
    }
    Ok(headers)
}

fn header_value(raw: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(raw).map_err(|e| AuthError::new(format!("invalid header value: {e}")))
}

fn is_session_gone_status(status: u16) -> bool {
    matches!(status, 401 | 403 | 404)
}
