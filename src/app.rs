//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::auth::AuthService;
use crate::pages::sign_up::SignUpPage;
use crate::util::feedback::Feedback;

/// Root application component.
///
/// Provides the injected auth client and feedback channel to every page.
/// Their lifetime is the application's, not any one page's.
#[component]
pub fn App(auth: Arc<dyn AuthService>, feedback: Arc<dyn Feedback>) -> impl IntoView {
    provide_meta_context();

    provide_context(auth);
    provide_context(feedback);

    view! {
        <Stylesheet id="leptos" href="/pkg/session-view.css"/>
        <Title text="Sign Up"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=SignUpPage/>
            </Routes>
        </Router>
    }
}
