//! OAuth redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Starting sign-in navigates the browser to the provider's authorize URL.
//! When the provider sends the browser back, the session arrives in the URL
//! fragment (`#access_token=...&expires_in=...` or `#error=...`). Parsing is
//! pure; the browser glue is gated behind the `csr` feature.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use crate::net::auth::AuthError;

/// Session fields carried back in the landing URL fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthLanding {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Parse an OAuth landing fragment (with or without the leading `#`).
///
/// Returns `Ok(None)` when the fragment carries no auth result.
///
/// # Errors
///
/// Returns an [`AuthError`] when the provider reported a failed sign-in.
pub fn parse_landing_fragment(fragment: &str) -> Result<Option<OAuthLanding>, AuthError> {
    let fragment = fragment.trim_start_matches('#');
    if fragment.is_empty() {
        return Ok(None);
    }
    // Reuse the URL parser's form decoding for the fragment pairs.
    let Ok(url) = reqwest::Url::parse(&format!("http://landing.invalid/?{fragment}")) else {
        return Ok(None);
    };

    let mut access_token = None;
    let mut expires_in = None;
    let mut error = None;
    let mut error_description = None;
    for (key, value) in url.query_pairs() {
        match &*key {
            "access_token" => access_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::new(error_description.unwrap_or(error)));
    }
    Ok(access_token.filter(|t| !t.is_empty()).map(|access_token| OAuthLanding { access_token, expires_in }))
}

/// Redirect hook that navigates the current window.
#[cfg(feature = "csr")]
#[must_use]
pub fn browser_redirect() -> crate::net::gotrue::RedirectFn {
    std::sync::Arc::new(|url: &str| -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        window.location().set_href(url).map_err(|e| format!("navigation failed: {e:?}"))
    })
}

/// Read and parse the current window's URL fragment.
#[cfg(feature = "csr")]
pub fn landing_from_location() -> Result<Option<OAuthLanding>, AuthError> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let hash = window.location().hash().unwrap_or_default();
    parse_landing_fragment(&hash)
}

/// Drop the fragment from the address bar so tokens are not left visible.
#[cfg(feature = "csr")]
pub fn clear_location_fragment() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}
