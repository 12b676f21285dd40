//! Sign-up / sign-out screen backed by the hosted identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each mounted page owns a fresh `ViewState` signal and a `SessionController`
//! built from the `AuthService` and `Feedback` found in context. Rendering is
//! a pure function of `(current_user, is_busy)`; the helpers below hold all
//! screen copy so it can be tested without a reactive runtime.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::auth::AuthService;
use crate::state::controller::SessionController;
use crate::state::session::{CurrentUser, Screen, ViewState};
use crate::state::store::ViewStore;
use crate::util::feedback::Feedback;

pub const AVATAR_ALT: &str = "User avatar";
pub const LOADING_LABEL: &str = "Loading...";
pub const SIGN_OUT_LABEL: &str = "Sign Out";
pub const SIGN_UP_LABEL: &str = "Sign Up with Google";

/// Title line above the action.
#[must_use]
pub fn heading(state: &ViewState) -> &'static str {
    if state.is_authenticated() { "Welcome Back" } else { "Get Started" }
}

#[must_use]
pub fn subheading(state: &ViewState) -> &'static str {
    if state.is_authenticated() {
        "You're successfully logged in"
    } else {
        "Sign up with your Google account"
    }
}

/// Label of the single action button; busy wins over the resting label.
#[must_use]
pub fn action_label(state: &ViewState) -> &'static str {
    match state.screen() {
        Screen::Authenticated { busy: true, .. } | Screen::Unauthenticated { busy: true } => LOADING_LABEL,
        Screen::Authenticated { .. } => SIGN_OUT_LABEL,
        Screen::Unauthenticated { .. } => SIGN_UP_LABEL,
    }
}

/// `(email, full name)` lines for the profile card; missing fields render empty.
#[must_use]
pub fn profile_lines(user: &CurrentUser) -> (String, String) {
    (user.email.clone().unwrap_or_default(), user.full_name.clone().unwrap_or_default())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionAction {
    SignUp,
    SignOut,
}

/// Run `action` on the local executor. No-op outside the browser.
fn run_action<V: ViewStore>(controller: &SessionController<V>, action: SessionAction) {
    #[cfg(feature = "csr")]
    {
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            match action {
                SessionAction::SignUp => controller.sign_up().await,
                SessionAction::SignOut => controller.sign_out().await,
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (controller, action);
    }
}

/// Sign-up page: Google sign-up when signed out, profile + sign-out when signed in.
#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = expect_context::<Arc<dyn AuthService>>();
    let feedback = expect_context::<Arc<dyn Feedback>>();
    let state = RwSignal::new(ViewState::default());
    let controller = SessionController::new(auth, feedback, state);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(controller.mount());

    on_cleanup({
        let controller = controller.clone();
        move || controller.unmount()
    });

    let body = move || {
        let current = state.get();
        let label = action_label(&current);
        match current.screen() {
            Screen::Authenticated { user, busy } => {
                let (email, full_name) = profile_lines(user);
                let avatar_url = user.avatar_url.clone();
                let controller = controller.clone();
                view! {
                    <div class="session-card__body">
                        <div class="session-profile">
                            <img class="session-profile__avatar" src=avatar_url alt=AVATAR_ALT/>
                            <div>
                                <p class="session-profile__email">{email}</p>
                                <p class="session-profile__name">{full_name}</p>
                            </div>
                        </div>
                        <button
                            class="session-button session-button--danger"
                            disabled=busy
                            on:click=move |_| run_action(&controller, SessionAction::SignOut)
                        >
                            {label}
                        </button>
                    </div>
                }
                .into_any()
            }
            Screen::Unauthenticated { busy } => {
                let controller = controller.clone();
                view! {
                    <button
                        class="session-button"
                        disabled=busy
                        on:click=move |_| run_action(&controller, SessionAction::SignUp)
                    >
                        {label}
                    </button>
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="session-page">
            <div class="session-card">
                <div class="session-card__header">
                    <h1>{move || heading(&state.get())}</h1>
                    <p class="session-card__subtitle">{move || subheading(&state.get())}</p>
                </div>
                {body}
            </div>
        </div>
    }
}
