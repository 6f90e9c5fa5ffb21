use std::{
    collections::HashMap,
    net::{Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use reqwest::{Client, Url};
use spotidal::TransferError;
use spotidal::oauth::{Authorizer, OAuthSettings};
use spotidal::utils::generate_code_challenge;
use tokio::net::TcpListener;

type FormFields = HashMap<String, String>;

struct TokenEndpoint {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<FormFields>>,
}

async fn token_handler(
    State(mock): State<Arc<TokenEndpoint>>,
    Form(form): Form<FormFields>,
) -> (StatusCode, String) {
    mock.requests.lock().unwrap().push(form);
    (mock.status, mock.body.clone())
}

/// Starts a token endpoint answering every request with `status` and `body`.
async fn spawn_token_endpoint(status: StatusCode, body: &str) -> (String, Arc<TokenEndpoint>) {
    let mock = Arc::new(TokenEndpoint {
        status,
        body: body.to_string(),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/token", post(token_handler))
        .with_state(Arc::clone(&mock));

    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/token"), mock)
}

fn settings(token_url: String, pkce: bool) -> OAuthSettings {
    OAuthSettings {
        authorize_url: "https://auth.example.com/authorize".to_string(),
        token_url,
        client_id: "client-123".to_string(),
        client_secret: if pkce {
            None
        } else {
            Some("s3cret".to_string())
        },
        // port 0 lets the callback server pick a free port
        redirect_uri: "http://127.0.0.1:0/callback".to_string(),
        scope: "user-library-read".to_string(),
        pkce,
        extra_params: if pkce {
            vec![("campaignId".to_string(), "default".to_string())]
        } else {
            Vec::new()
        },
        timeout: Duration::from_secs(5),
    }
}

fn query_param(url: &str, key: &str) -> Option<String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Plays the browser: follows the redirect back to the callback server.
fn redirect(addr: SocketAddr, params: Vec<(&'static str, String)>) {
    tokio::spawn(async move {
        let url = Url::parse_with_params(&format!("http://{addr}/callback"), &params).unwrap();
        let client = Client::builder().pool_max_idle_per_host(0).build().unwrap();
        let _ = client.get(url).send().await;
    });
}

#[tokio::test]
async fn test_confidential_flow_sends_client_secret() {
    let (token_url, mock) =
        spawn_token_endpoint(StatusCode::OK, r#"{"access_token":"tok-1","token_type":"Bearer"}"#)
            .await;
    let authorizer = Authorizer::new(settings(token_url, false)).unwrap();

    let mut prompt_url = String::new();
    let token = authorizer
        .authorize(|prompt| {
            prompt_url = prompt.url.clone();
            redirect(prompt.callback_addr, vec![("code", "AUTH_CODE".to_string())]);
        })
        .await
        .unwrap();

    assert_eq!(token.secret(), "tok-1");
    assert!(query_param(&prompt_url, "code_challenge").is_none());
    assert!(query_param(&prompt_url, "state").is_none());

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let form = &requests[0];
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "AUTH_CODE");
    assert_eq!(form["client_id"], "client-123");
    assert_eq!(form["client_secret"], "s3cret");
    assert_eq!(form["redirect_uri"], "http://127.0.0.1:0/callback");
    assert!(!form.contains_key("code_verifier"));
}

#[tokio::test]
async fn test_pkce_flow_sends_verifier_matching_challenge() {
    let (token_url, mock) = spawn_token_endpoint(StatusCode::OK, r#"{"access_token":"tok-2"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, true)).unwrap();

    let mut prompt_url = String::new();
    let token = authorizer
        .authorize(|prompt| {
            prompt_url = prompt.url.clone();
            let state = query_param(&prompt.url, "state").unwrap();
            redirect(
                prompt.callback_addr,
                vec![("code", "PKCE_CODE".to_string()), ("state", state)],
            );
        })
        .await
        .unwrap();

    assert_eq!(token.secret(), "tok-2");

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let form = &requests[0];
    assert_eq!(form["code"], "PKCE_CODE");
    assert!(!form.contains_key("client_secret"));

    let verifier = &form["code_verifier"];
    assert_eq!(verifier.len(), 86);
    assert_eq!(
        query_param(&prompt_url, "code_challenge").unwrap(),
        generate_code_challenge(verifier)
    );
}

#[tokio::test]
async fn test_authorization_url_parameters() {
    let pkce = settings("http://127.0.0.1:1/token".to_string(), true);
    let request = pkce.authorization_request().unwrap();

    assert!(request.url.starts_with("https://auth.example.com/authorize?"));
    assert_eq!(query_param(&request.url, "client_id").unwrap(), "client-123");
    assert_eq!(query_param(&request.url, "response_type").unwrap(), "code");
    assert_eq!(
        query_param(&request.url, "redirect_uri").unwrap(),
        "http://127.0.0.1:0/callback"
    );
    assert_eq!(query_param(&request.url, "code_challenge_method").unwrap(), "S256");
    assert_eq!(query_param(&request.url, "campaignId").unwrap(), "default");
    assert_eq!(query_param(&request.url, "state"), request.state);
    assert_eq!(
        query_param(&request.url, "code_challenge").unwrap(),
        generate_code_challenge(request.verifier.as_deref().unwrap())
    );

    // a new request never reuses the verifier
    let again = pkce.authorization_request().unwrap();
    assert_ne!(again.verifier, request.verifier);
    assert_ne!(again.state, request.state);

    let confidential = settings("http://127.0.0.1:1/token".to_string(), false);
    let request = confidential.authorization_request().unwrap();
    assert!(request.verifier.is_none());
    assert!(request.state.is_none());
    assert_eq!(
        query_param(&request.url, "scope").unwrap(),
        "user-library-read"
    );
}

#[tokio::test]
async fn test_token_endpoint_error_status() {
    let (token_url, _mock) =
        spawn_token_endpoint(StatusCode::BAD_REQUEST, r#"{"error":"invalid_grant"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, false)).unwrap();

    let err = authorizer.exchange_code("stale", None).await.unwrap_err();
    match err {
        TransferError::TokenExchangeFailed { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_token_endpoint_error_field_with_ok_status() {
    let (token_url, _mock) =
        spawn_token_endpoint(StatusCode::OK, r#"{"error":"invalid_client"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, false)).unwrap();

    let err = authorizer.exchange_code("code", None).await.unwrap_err();
    assert!(matches!(err, TransferError::TokenExchangeFailed { .. }));
}

#[tokio::test]
async fn test_token_response_without_access_token() {
    let (token_url, _mock) = spawn_token_endpoint(StatusCode::OK, r#"{"token_type":"Bearer"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, false)).unwrap();

    let err = authorizer.exchange_code("code", None).await.unwrap_err();
    assert!(matches!(err, TransferError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_token_response_not_json() {
    let (token_url, _mock) = spawn_token_endpoint(StatusCode::OK, "<html>oops</html>").await;
    let authorizer = Authorizer::new(settings(token_url, true)).unwrap();

    let err = authorizer
        .exchange_code("code", Some("verifier"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_authorization_times_out() {
    let (token_url, mock) = spawn_token_endpoint(StatusCode::OK, r#"{"access_token":"x"}"#).await;
    let mut settings = settings(token_url, false);
    settings.timeout = Duration::from_millis(200);
    let authorizer = Authorizer::new(settings).unwrap();

    let mut callback_addr = None;
    let err = authorizer
        .authorize(|prompt| callback_addr = Some(prompt.callback_addr))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::AuthorizationTimeout));
    assert!(mock.requests.lock().unwrap().is_empty());

    // the listener is gone once authorize returns
    assert!(TcpListener::bind(callback_addr.unwrap()).await.is_ok());
}

#[tokio::test]
async fn test_denied_consent_skips_token_exchange() {
    let (token_url, mock) = spawn_token_endpoint(StatusCode::OK, r#"{"access_token":"x"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, false)).unwrap();

    let err = authorizer
        .authorize(|prompt| {
            redirect(
                prompt.callback_addr,
                vec![
                    ("error", "access_denied".to_string()),
                    ("error_description", "User denied".to_string()),
                ],
            );
        })
        .await
        .unwrap_err();

    match err {
        TransferError::AuthorizationDenied(reason) => {
            assert_eq!(reason, "access_denied: User denied");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_state_mismatch_is_rejected() {
    let (token_url, mock) = spawn_token_endpoint(StatusCode::OK, r#"{"access_token":"x"}"#).await;
    let authorizer = Authorizer::new(settings(token_url, true)).unwrap();

    let err = authorizer
        .authorize(|prompt| {
            redirect(
                prompt.callback_addr,
                vec![
                    ("code", "CODE".to_string()),
                    ("state", "forged".to_string()),
                ],
            );
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::AuthorizationDenied(ref r) if r == "state mismatch"));
    assert!(mock.requests.lock().unwrap().is_empty());
}
