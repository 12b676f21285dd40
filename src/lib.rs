//! # session-view
//!
//! Leptos + WASM sign-up / sign-out screen for a hosted identity provider.
//!
//! The screen mirrors the provider's current session into local view state
//! and triggers two remote calls: start Google OAuth sign-in and sign out.
//! Session validation, tokens and persistence stay with the provider.
//!
//! ARCHITECTURE
//! ============
//! - `net`: the `AuthService` contract, its HTTP client, and wire types.
//! - `state`: `ViewState` and the `SessionController` that owns its lifecycle.
//! - `pages`: the `SignUpPage` component.
//! - `app`: root component that provides the injected client via context.

pub mod app;
pub mod config;
pub mod logging;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: build the auth client, adopt an OAuth landing, mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use std::sync::Arc;

    use leptos::prelude::*;

    use crate::app::App;
    use crate::config::AuthConfig;
    use crate::net::auth::AuthService;
    use crate::net::gotrue::GoTrueClient;
    use crate::util::feedback::{BrowserFeedback, Feedback};
    use crate::util::redirect;

    logging::init_browser();

    let config = match AuthConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "auth client not configured");
            return;
        }
    };
    let client = match GoTrueClient::new(config, redirect::browser_redirect()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "auth client init failed");
            return;
        }
    };

    match redirect::landing_from_location() {
        Ok(Some(landing)) => {
            let client = Arc::clone(&client);
            leptos::task::spawn_local(async move {
                if let Err(e) = client.set_session_from_access_token(&landing.access_token, landing.expires_in).await {
                    tracing::error!(error = %e, "failed to adopt oauth session");
                }
                redirect::clear_location_fragment();
            });
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "oauth provider reported an error");
            redirect::clear_location_fragment();
        }
    }

    let auth: Arc<dyn AuthService> = client;
    let feedback: Arc<dyn Feedback> = Arc::new(BrowserFeedback);
    leptos::mount::mount_to_body(move || view! { <App auth=auth feedback=feedback/> });
}
