use std::net::SocketAddr;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can abort an export or import run.
///
/// Per-track matching failures are not represented here: the importer turns
/// them into [`crate::types::MatchResult::NotFound`] values instead.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("missing configuration value: {0} is not set")]
    ConfigurationMissing(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("cannot listen for the authorization callback on {0}: {1}")]
    CallbackBind(SocketAddr, #[source] std::io::Error),

    #[error("timed out waiting for the authorization callback")]
    AuthorizationTimeout,

    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("failed to create playlist, status {status}: {body}")]
    PlaylistCreationFailed { status: StatusCode, body: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransferError {
    pub fn malformed(context: &str, err: impl std::fmt::Display) -> Self {
        TransferError::MalformedResponse(format!("{context}: {err}"))
    }
}
