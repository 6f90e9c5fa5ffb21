use async_trait::async_trait;
use reqwest::Client;

use crate::{
    TransferError,
    catalog::SavedTracksSource,
    config,
    types::{AccessToken, SavedTracksPage},
    utils,
};

/// Client for the saved-tracks listing of the Spotify Web API.
///
/// Holds the bearer token obtained through [`crate::oauth::Authorizer`] and
/// a shared `reqwest` client with the crate's timeouts. The token is only
/// ever sent in the `Authorization` header.
///
/// # Example
///
/// ```
/// use spotidal::{catalog, spotify::SpotifyClient, types::AccessToken};
///
/// let client = SpotifyClient::from_env(AccessToken::new(token))?;
/// let tracks = catalog::export_saved_tracks(&client, |fetched, total| {
///     println!("{fetched}/{total:?}");
/// })
/// .await?;
/// ```
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: AccessToken,
}

impl SpotifyClient {
    /// Creates a client against an explicit API base URL.
    ///
    /// A trailing slash on `api_url` is ignored, so both
    /// `https://api.spotify.com/v1` and `https://api.spotify.com/v1/` work.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Http`] if the underlying HTTP client cannot
    /// be built (for example when no TLS backend is available).
    pub fn new(api_url: impl Into<String>, token: AccessToken) -> Result<Self, TransferError> {
        Ok(Self {
            http: utils::http_client()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Creates a client against the configured API base URL.
    ///
    /// Uses [`config::spotify_api_url`], i.e. `SPOTIFY_API_URL` or the public
    /// Web API endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::new`].
    pub fn from_env(token: AccessToken) -> Result<Self, TransferError> {
        Self::new(config::spotify_api_url(), token)
    }
}

/// Parses one page of `GET /me/tracks`.
///
/// Every item must carry a track with id, name, artists (name and id) and
/// album name. Additional fields such as `added_at` or `duration_ms` are
/// ignored.
///
/// # Errors
///
/// Returns [`TransferError::MalformedResponse`] if the body is not JSON or
/// a required field is missing or has the wrong type.
pub fn parse_saved_tracks_page(body: &str) -> Result<SavedTracksPage, TransferError> {
    serde_json::from_str(body).map_err(|e| TransferError::malformed("saved tracks page", e))
}

#[async_trait]
impl SavedTracksSource for SpotifyClient {
    /// `{api}/me/tracks?limit=50`; later pages come from the `next` links.
    fn first_page_url(&self) -> String {
        format!(
            "{uri}/me/tracks?limit={limit}",
            uri = self.api_url,
            limit = config::SAVED_TRACKS_PAGE_SIZE
        )
    }

    /// Fetches one page with the bearer token.
    ///
    /// # Errors
    ///
    /// - [`TransferError::Http`] on transport failures
    /// - [`TransferError::UnexpectedStatus`] for any non-success status,
    ///   carrying the response body (e.g. an expired token)
    /// - [`TransferError::MalformedResponse`] if the page cannot be parsed
    async fn fetch_page(&self, url: &str) -> Result<SavedTracksPage, TransferError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransferError::UnexpectedStatus { status, body });
        }

        parse_saved_tracks_page(&body)
    }
}
