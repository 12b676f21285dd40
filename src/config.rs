//! Identity-provider client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session view owns no settings. The composing application builds an
//! `AuthConfig` once and uses it to construct the injected client.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const AUTH_URL_VAR: &str = "AUTH_URL";
pub const AUTH_ANON_KEY_VAR: &str = "AUTH_ANON_KEY";
pub const AUTH_REDIRECT_TO_VAR: &str = "AUTH_REDIRECT_TO";
pub const AUTH_REQUEST_TIMEOUT_SECS_VAR: &str = "AUTH_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was absent or empty.
    #[error("missing required setting: {var}")]
    Missing { var: String },

    /// A setting was present but unusable.
    #[error("invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Project base URL, without trailing slash.
    pub url: String,
    /// Public (anon) API key sent as the `apikey` header.
    pub anon_key: String,
    /// Where the provider sends the browser after OAuth completes.
    pub redirect_to: Option<String>,
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    /// Build config from process environment variables.
    ///
    /// Required:
    /// - `AUTH_URL`: provider project URL (`http://` or `https://`)
    /// - `AUTH_ANON_KEY`: public API key
    ///
    /// Optional:
    /// - `AUTH_REDIRECT_TO`: post-login redirect target
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = dotenvy::dotenv();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from values baked in at compile time.
    ///
    /// Browser builds have no process environment, so the bundle carries them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required value was not set at build time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                AUTH_URL_VAR => option_env!("AUTH_URL"),
                AUTH_ANON_KEY_VAR => option_env!("AUTH_ANON_KEY"),
                AUTH_REDIRECT_TO_VAR => option_env!("AUTH_REDIRECT_TO"),
                AUTH_REQUEST_TIMEOUT_SECS_VAR => option_env!("AUTH_REQUEST_TIMEOUT_SECS"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required key is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::Missing { var: key.to_owned() });

        let url = require(AUTH_URL_VAR)?.trim_end_matches('/').to_owned();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid { var: AUTH_URL_VAR.to_owned(), value: url });
        }
        let anon_key = require(AUTH_ANON_KEY_VAR)?;
        let redirect_to = get(AUTH_REDIRECT_TO_VAR);
        let request_timeout_secs = get(AUTH_REQUEST_TIMEOUT_SECS_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self { url, anon_key, redirect_to, request_timeout_secs })
    }

    /// Absolute URL of an auth API path, e.g. `auth_endpoint("logout")`.
    #[must_use]
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }
}
