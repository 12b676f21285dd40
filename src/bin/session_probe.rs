//! Headless check of the auth client configuration.
//!
//! Reads `AUTH_*` settings from the environment (or `.env`), mounts a session
//! controller without a browser, and prints what the screen would show. With
//! an access token argument it first adopts that session; otherwise, when
//! signed out, it prints the OAuth URL the sign-up button would open.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::sync::Arc;

    use session_view::config::AuthConfig;
    use session_view::net::auth::AuthService;
    use session_view::net::gotrue::GoTrueClient;
    use session_view::pages::sign_up::{action_label, heading, profile_lines, subheading};
    use session_view::state::controller::SessionController;
    use session_view::state::session::Screen;
    use session_view::state::store::SharedViewState;
    use session_view::util::feedback::LogFeedback;

    session_view::logging::init();

    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "auth client not configured");
            return ExitCode::FAILURE;
        }
    };
    let print_url = Arc::new(|url: &str| -> Result<(), String> {
        println!("open to sign in: {url}");
        Ok(())
    });
    let client = match GoTrueClient::new(config, print_url) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "auth client init failed");
            return ExitCode::FAILURE;
        }
    };

    let controller =
        SessionController::new(Arc::clone(&client) as Arc<dyn AuthService>, Arc::new(LogFeedback), SharedViewState::new());
    controller.mount().await;

    if let Some(token) = std::env::args().nth(1) {
        if let Err(e) = client.set_session_from_access_token(&token, None).await {
            tracing::error!(error = %e, "access token rejected");
            controller.unmount();
            return ExitCode::FAILURE;
        }
    }

    let state = controller.state();
    println!("{}", heading(&state));
    println!("{}", subheading(&state));
    match state.screen() {
        Screen::Authenticated { user, .. } => {
            let (email, full_name) = profile_lines(user);
            println!("{email} {full_name}");
        }
        Screen::Unauthenticated { .. } => {
            println!("[{}]", action_label(&state));
            controller.sign_up().await;
        }
    }

    controller.unmount();
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {}
