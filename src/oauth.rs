//! OAuth 2.0 authorization-code flow, with or without PKCE.
//!
//! One [`Authorizer`] drives one consent round trip:
//!
//! 1. build the authorization URL (adding challenge and `state` for PKCE),
//! 2. start the local [`CallbackServer`] so it listens before the user can be
//!    redirected to it,
//! 3. hand the URL to the user,
//! 4. await the redirect with a bounded wait,
//! 5. exchange the code at the token endpoint.
//!
//! Spotify is used as a confidential client (client secret, no PKCE) while
//! Tidal uses the public PKCE variant; see [`crate::config`] for the presets.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use reqwest::{Client, StatusCode, Url};

use crate::{
    TransferError,
    server::CallbackServer,
    types::{AccessToken, CallbackOutcome, PendingAuthorization, TokenResponse},
    utils,
};

/// Everything needed to run the flow against one provider.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub authorize_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub pkce: bool,
    pub extra_params: Vec<(String, String)>,
    pub timeout: Duration,
}

/// An authorization URL plus the secrets that have to survive until the
/// token exchange.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub verifier: Option<String>,
    pub state: Option<String>,
}

/// What the user has to be told to complete consent.
#[derive(Debug, Clone)]
pub struct AuthorizationPrompt {
    pub url: String,
    pub callback_addr: SocketAddr,
}

impl OAuthSettings {
    pub fn authorization_url(
        &self,
        challenge: Option<&str>,
        state: Option<&str>,
    ) -> Result<String, TransferError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", self.scope.as_str()),
        ];
        if let Some(challenge) = challenge {
            params.push(("code_challenge", challenge));
            params.push(("code_challenge_method", "S256"));
        }
        if let Some(state) = state {
            params.push(("state", state));
        }
        for (key, value) in &self.extra_params {
            params.push((key.as_str(), value.as_str()));
        }

        Url::parse_with_params(&self.authorize_url, params.iter())
            .map(String::from)
            .map_err(|e| {
                TransferError::InvalidConfiguration(format!(
                    "authorize url '{}': {}",
                    self.authorize_url, e
                ))
            })
    }

    /// Creates a fresh request; PKCE flows get a new verifier and state.
    pub fn authorization_request(&self) -> Result<AuthorizationRequest, TransferError> {
        if !self.pkce {
            return Ok(AuthorizationRequest {
                url: self.authorization_url(None, None)?,
                verifier: None,
                state: None,
            });
        }

        let (verifier, challenge) = utils::generate_pkce_pair();
        let state = utils::generate_state();
        Ok(AuthorizationRequest {
            url: self.authorization_url(Some(&challenge), Some(&state))?,
            verifier: Some(verifier),
            state: Some(state),
        })
    }
}

pub struct Authorizer {
    settings: OAuthSettings,
    http: Client,
}

impl Authorizer {
    pub fn new(settings: OAuthSettings) -> Result<Self, TransferError> {
        Ok(Self {
            settings,
            http: utils::http_client()?,
        })
    }

    pub fn settings(&self) -> &OAuthSettings {
        &self.settings
    }

    /// Runs the full flow and returns the access token.
    ///
    /// `present` is called exactly once, after the callback server is
    /// listening, with the URL the user has to open.
    pub async fn authorize<F>(&self, present: F) -> Result<AccessToken, TransferError>
    where
        F: FnOnce(&AuthorizationPrompt),
    {
        let request = self.settings.authorization_request()?;
        let addr = utils::listen_addr(&self.settings.redirect_uri)?;

        let pending = Arc::new(PendingAuthorization::new());
        let server =
            CallbackServer::start(addr, Arc::clone(&pending), self.settings.timeout).await?;

        present(&AuthorizationPrompt {
            url: request.url.clone(),
            callback_addr: server.local_addr(),
        });

        let outcome = tokio::time::timeout(self.settings.timeout, pending.wait()).await;
        server.shutdown().await;

        match outcome.map_err(|_| TransferError::AuthorizationTimeout)? {
            CallbackOutcome::Authorized { code, state } => {
                if let Some(expected) = &request.state {
                    if state.as_deref() != Some(expected.as_str()) {
                        return Err(TransferError::AuthorizationDenied(
                            "state mismatch".to_string(),
                        ));
                    }
                }
                self.exchange_code(&code, request.verifier.as_deref()).await
            }
            CallbackOutcome::Denied { error, description } => {
                Err(TransferError::AuthorizationDenied(match description {
                    Some(description) => format!("{error}: {description}"),
                    None => error,
                }))
            }
        }
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Confidential clients send their secret, PKCE clients the verifier
    /// generated for this flow.
    pub async fn exchange_code(
        &self,
        code: &str,
        verifier: Option<&str>,
    ) -> Result<AccessToken, TransferError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("client_id", self.settings.client_id.as_str()),
        ];
        if let Some(secret) = &self.settings.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        if let Some(verifier) = verifier {
            form.push(("code_verifier", verifier));
        }

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            return Err(TransferError::TokenExchangeFailed { status, body });
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| TransferError::malformed("token response", e))?;
        if token.error.is_some() {
            return Err(TransferError::TokenExchangeFailed { status, body });
        }

        token
            .access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                TransferError::MalformedResponse("token response without access_token".into())
            })
    }
}
