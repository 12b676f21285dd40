use super::*;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Helpers
// =============================================================================

fn make_config(redirect_to: Option<&str>) -> AuthConfig {
    AuthConfig {
        url: "https://proj.example.co".to_owned(),
        anon_key: "anon-key".to_owned(),
        redirect_to: redirect_to.map(str::to_owned),
        request_timeout_secs: 5,
    }
}

fn recording_redirect(seen: &Arc<Mutex<Vec<String>>>) -> RedirectFn {
    let seen = Arc::clone(seen);
    Arc::new(move |url: &str| -> Result<(), String> {
        seen.lock().unwrap().push(url.to_owned());
        Ok(())
    })
}

fn noop_redirect() -> RedirectFn {
    Arc::new(|_: &str| -> Result<(), String> { Ok(()) })
}

// =============================================================================
// authorize_url
// =============================================================================

#[test]
fn authorize_url_without_redirect() {
    let url = authorize_url(&make_config(None), OAuthProvider::Google).unwrap();
    assert_eq!(url, "https://proj.example.co/auth/v1/authorize?provider=google");
}

#[test]
fn authorize_url_encodes_redirect_target() {
    let url = authorize_url(&make_config(Some("http://localhost:3000/welcome?x=1")), OAuthProvider::Google).unwrap();
    assert_eq!(
        url,
        "https://proj.example.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fwelcome%3Fx%3D1"
    );
}

// =============================================================================
// auth_headers
// =============================================================================

#[test]
fn auth_headers_include_apikey_and_bearer() {
    let headers = auth_headers("anon-key", Some("tok-1")).unwrap();
    assert_eq!(headers.get("apikey").unwrap(), "anon-key");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok-1");
}

#[test]
fn auth_headers_without_token_omit_authorization() {
    let headers = auth_headers("anon-key", None).unwrap();
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn auth_headers_reject_control_characters() {
    assert!(auth_headers("bad\nkey", None).is_err());
}

#[test]
fn session_gone_statuses() {
    assert!(is_session_gone_status(401));
    assert!(is_session_gone_status(403));
    assert!(is_session_gone_status(404));
    assert!(!is_session_gone_status(500));
    assert!(!is_session_gone_status(200));
}

// =============================================================================
// AuthService without network
// =============================================================================

#[tokio::test]
async fn get_session_starts_empty() {
    let client = GoTrueClient::new(make_config(None), noop_redirect()).unwrap();
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn sign_in_with_oauth_hands_url_to_redirect() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = GoTrueClient::new(make_config(None), recording_redirect(&seen)).unwrap();
    client.sign_in_with_oauth(OAuthProvider::Google).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["https://proj.example.co/auth/v1/authorize?provider=google".to_owned()]);
}

#[tokio::test]
async fn sign_in_with_oauth_surfaces_redirect_failure() {
    let client =
        GoTrueClient::new(make_config(None), Arc::new(|_: &str| -> Result<(), String> { Err("popup blocked".to_owned()) })).unwrap();
    let err = client.sign_in_with_oauth(OAuthProvider::Google).await.unwrap_err();
    assert_eq!(err.message, "popup blocked");
}

#[tokio::test]
async fn sign_out_without_session_notifies_signed_out() {
    let client = GoTrueClient::new(make_config(None), noop_redirect()).unwrap();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_in = Arc::clone(&events);
    let _sub = client.on_auth_state_change(Arc::new(move |event: AuthChangeEvent, session: Option<&Session>| {
        events_in.lock().unwrap().push((event, session.is_some()));
    }));
    client.sign_out().await.unwrap();
    assert_eq!(*events.lock().unwrap(), vec![(AuthChangeEvent::SignedOut, false)]);
}

#[tokio::test]
async fn dropped_subscription_stops_notifications() {
    let client = GoTrueClient::new(make_config(None), noop_redirect()).unwrap();
    let count = Arc::new(AtomicUsize::new(0));
    let count_in = Arc::clone(&count);
    let sub = client.on_auth_state_change(Arc::new(move |_: AuthChangeEvent, _: Option<&Session>| {
        count_in.fetch_add(1, Ordering::SeqCst);
    }));
    drop(sub);
    client.sign_out().await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

// =============================================================================
// AuthService against a local provider
// =============================================================================

/// Serve `/auth/v1/user` and `/auth/v1/logout` on a loopback port.
///
/// `/user` answers `user_status` and only accepts the `tok-1` bearer with the
/// `anon-key` apikey; `/logout` always answers `logout_status`.
async fn spawn_provider(user_status: StatusCode, logout_status: StatusCode) -> AuthConfig {
    let app = Router::new()
        .route(
            "/auth/v1/user",
            get(move |headers: axum::http::HeaderMap| async move {
                let authorized = headers.get("apikey").is_some_and(|v| v == "anon-key")
                    && headers.get(AUTHORIZATION).is_some_and(|v| v == "Bearer tok-1");
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "missing credentials" })));
                }
                if !user_status.is_success() {
                    return (user_status, Json(json!({ "msg": "invalid JWT" })));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": "u1",
                        "email": "u1@example.com",
                        "user_metadata": { "full_name": "User One" }
                    })),
                )
            }),
        )
        .route("/auth/v1/logout", post(move || async move { (logout_status, Json(json!({ "msg": "logout" }))) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    AuthConfig { url: format!("http://{addr}"), ..make_config(None) }
}

fn record_events(client: &GoTrueClient) -> (Arc<Mutex<Vec<(AuthChangeEvent, bool)>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_in = Arc::clone(&events);
    let sub = client.on_auth_state_change(Arc::new(move |event: AuthChangeEvent, session: Option<&Session>| {
        events_in.lock().unwrap().push((event, session.is_some()));
    }));
    (events, sub)
}

#[tokio::test]
async fn access_token_is_exchanged_for_user_and_signs_in() {
    let config = spawn_provider(StatusCode::OK, StatusCode::NO_CONTENT).await;
    let client = GoTrueClient::new(config, noop_redirect()).unwrap();
    let (events, _sub) = record_events(&client);

    let session = client.set_session_from_access_token("tok-1", Some(3600)).await.unwrap();
    assert_eq!(session.user.id, "u1");
    assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("User One"));
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(client.get_session().await.unwrap(), Some(session));
    assert_eq!(*events.lock().unwrap(), vec![(AuthChangeEvent::SignedIn, true)]);
}

#[tokio::test]
async fn rejected_access_token_surfaces_provider_message() {
    let config = spawn_provider(StatusCode::UNAUTHORIZED, StatusCode::NO_CONTENT).await;
    let client = GoTrueClient::new(config, noop_redirect()).unwrap();
    let (events, _sub) = record_events(&client);

    let err = client.set_session_from_access_token("tok-1", None).await.unwrap_err();
    assert_eq!(err.message, "auth request failed: 401: invalid JWT");
    assert_eq!(client.get_session().await.unwrap(), None);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sign_out_succeeds_when_provider_reports_session_gone() {
    for status in [StatusCode::NO_CONTENT, StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND] {
        let config = spawn_provider(StatusCode::OK, status).await;
        let client = GoTrueClient::new(config, noop_redirect()).unwrap();
        client.set_session_from_access_token("tok-1", None).await.unwrap();
        let (events, _sub) = record_events(&client);

        client.sign_out().await.unwrap();
        assert_eq!(client.get_session().await.unwrap(), None, "status {status}");
        assert_eq!(*events.lock().unwrap(), vec![(AuthChangeEvent::SignedOut, false)], "status {status}");
    }
}

#[tokio::test]
async fn sign_out_server_error_keeps_session() {
    let config = spawn_provider(StatusCode::OK, StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = GoTrueClient::new(config, noop_redirect()).unwrap();
    client.set_session_from_access_token("tok-1", None).await.unwrap();
    let (events, _sub) = record_events(&client);

    let err = client.sign_out().await.unwrap_err();
    assert_eq!(err.message, "auth request failed: 500: logout");
    assert!(client.get_session().await.unwrap().is_some());
    assert!(events.lock().unwrap().is_empty());
}
