use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::{
    TransferError,
    catalog::PlaylistDestination,
    config,
    tidal::{PLAYLISTS_TYPE, TRACKS_TYPE},
    types::{
        AccessToken, AddPlaylistItemsRequest, CreatePlaylistData, CreatePlaylistRequest,
        CreatePlaylistResponse, HitKind, PlaylistAttributes, PlaylistSpec, SearchHit,
        TidalResource, TidalSearchResponse,
    },
    utils,
};

pub struct TidalClient {
    http: Client,
    api_url: String,
    country_code: String,
    token: AccessToken,
}

impl TidalClient {
    pub fn new(
        api_url: impl Into<String>,
        country_code: impl Into<String>,
        token: AccessToken,
    ) -> Result<Self, TransferError> {
        Ok(Self {
            http: utils::http_client()?,
            api_url: api_url.into(),
            country_code: country_code.into(),
            token,
        })
    }

    pub fn from_env(country_code: Option<String>, token: AccessToken) -> Result<Self, TransferError> {
        Self::new(
            config::tidal_api_url(),
            country_code.unwrap_or_else(config::tidal_country_code),
            token,
        )
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Builds `{api}/{segments...}?countryCode=..`; segments are percent
    /// encoded, so a search query may contain spaces or slashes.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransferError> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            TransferError::InvalidConfiguration(format!("tidal api url '{}': {}", self.api_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                TransferError::InvalidConfiguration(format!(
                    "tidal api url '{}' cannot be a base",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("countryCode", &self.country_code);

        Ok(url)
    }
}

#[async_trait]
impl PlaylistDestination for TidalClient {
    async fn create_playlist(&self, playlist: &PlaylistSpec) -> Result<String, TransferError> {
        let request = CreatePlaylistRequest {
            data: CreatePlaylistData {
                attributes: PlaylistAttributes {
                    access_type: if playlist.public { "PUBLIC" } else { "UNLISTED" }.to_string(),
                    description: playlist.description.clone(),
                    name: playlist.name.clone(),
                },
                kind: PLAYLISTS_TYPE.to_string(),
            },
        };

        let response = self
            .http
            .post(self.endpoint(&["playlists"])?)
            .bearer_auth(self.token.secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::CREATED {
            return Err(TransferError::PlaylistCreationFailed { status, body });
        }

        let created: CreatePlaylistResponse = serde_json::from_str(&body)
            .map_err(|e| TransferError::malformed("create playlist response", e))?;
        Ok(created.data.id)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, TransferError> {
        let url = self.endpoint(&["searchResults", query, "relationships", "tracks"])?;
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

        let results: TidalSearchResponse = serde_json::from_str(&body)
            .map_err(|e| TransferError::malformed("search response", e))?;

        Ok(results
            .data
            .into_iter()
            .map(|resource| SearchHit {
                kind: if resource.kind == TRACKS_TYPE {
                    HitKind::Track
                } else {
                    HitKind::Other(resource.kind)
                },
                id: resource.id,
            })
            .collect())
    }

    async fn add_to_playlist(
        &self,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), TransferError> {
        let request = AddPlaylistItemsRequest {
            data: vec![TidalResource {
                id: track_id.to_string(),
                kind: TRACKS_TYPE.to_string(),
            }],
        };

        let response = self
            .http
            .post(self.endpoint(&["playlists", playlist_id, "relationships", "items"])?)
            .bearer_auth(self.token.secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(TransferError::UnexpectedStatus { status, body });
        }

        Ok(())
    }
}
