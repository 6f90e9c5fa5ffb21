use std::{fmt, path::PathBuf, sync::OnceLock};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Notify;

/// A saved track in its service agnostic form.
///
/// This is the hand-off artifact between export and import. The `artists`
/// and `artist_ids` lists always have the same length, which is checked again
/// whenever a catalog is read back from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTrackRecord")]
pub struct TrackRecord {
    name: String,
    artists: Vec<String>,
    #[serde(rename = "artists_ids")]
    artist_ids: Vec<String>,
    album: String,
    #[serde(rename = "id")]
    source_id: String,
}

impl TrackRecord {
    pub fn new<I, N, D>(
        name: impl Into<String>,
        artists: I,
        album: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let (artists, artist_ids) = artists
            .into_iter()
            .map(|(name, id)| (name.into(), id.into()))
            .unzip();

        Self {
            name: name.into(),
            artists,
            artist_ids,
            album: album.into(),
            source_id: source_id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn artist_ids(&self) -> &[String] {
        &self.artist_ids
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }
}

#[derive(Deserialize)]
struct StoredTrackRecord {
    name: String,
    artists: Vec<String>,
    artists_ids: Vec<String>,
    album: String,
    id: String,
}

impl TryFrom<StoredTrackRecord> for TrackRecord {
    type Error = String;

    fn try_from(stored: StoredTrackRecord) -> Result<Self, Self::Error> {
        if stored.artists.len() != stored.artists_ids.len() {
            return Err(format!(
                "track '{}' has {} artists but {} artist ids",
                stored.id,
                stored.artists.len(),
                stored.artists_ids.len()
            ));
        }

        Ok(Self {
            name: stored.name,
            artists: stored.artists,
            artist_ids: stored.artists_ids,
            album: stored.album,
            source_id: stored.id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Authorized {
        code: String,
        state: Option<String>,
    },
    Denied {
        error: String,
        description: Option<String>,
    },
}

/// One-shot hand-off between the callback handler and the waiting authorizer.
///
/// The first outcome written wins; later writes are ignored.
#[derive(Debug, Default)]
pub struct PendingAuthorization {
    outcome: OnceLock<CallbackOutcome>,
    notify: Notify,
}

impl PendingAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the outcome and wakes every waiter. Returns `false` when an
    /// outcome was already recorded.
    pub fn complete(&self, outcome: CallbackOutcome) -> bool {
        let stored = self.outcome.set(outcome).is_ok();
        if stored {
            self.notify.notify_waiters();
        }
        stored
    }

    pub fn outcome(&self) -> Option<&CallbackOutcome> {
        self.outcome.get()
    }

    pub fn code(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(CallbackOutcome::Authorized { code, .. }) => Some(code),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(CallbackOutcome::Denied { error, .. }) => Some(error),
            _ => None,
        }
    }

    pub async fn wait(&self) -> CallbackOutcome {
        loop {
            // registered before the check so a concurrent `complete` is not lost
            let notified = self.notify.notified();
            if let Some(outcome) = self.outcome.get() {
                return outcome.clone();
            }
            notified.await;
        }
    }
}

/// Terminal states of the callback receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverState {
    Completed(CallbackOutcome),
    TimedOut,
}

/// Bearer credential for one service. Never written to disk.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTracksPage {
    pub items: Vec<SavedTrackItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrackItem {
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
}

impl From<SpotifyTrack> for TrackRecord {
    fn from(track: SpotifyTrack) -> Self {
        TrackRecord::new(
            track.name,
            track.artists.into_iter().map(|a| (a.name, a.id)),
            track.album.name,
            track.id,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidalResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TidalSearchResponse {
    #[serde(default)]
    pub data: Vec<TidalResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub data: CreatePlaylistData,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistData {
    pub attributes: PlaylistAttributes,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistAttributes {
    pub access_type: String,
    pub description: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub data: TidalResource,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddPlaylistItemsRequest {
    pub data: Vec<TidalResource>,
}

/// What the importer asks the destination to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl Default for PlaylistSpec {
    fn default() -> Self {
        Self {
            name: "Spotify Songs".to_string(),
            description: "Spotify Library".to_string(),
            public: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    Track,
    Other(String),
}

/// One entry of a destination search, in result order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub kind: HitKind,
}

/// Why a track could not be carried over. Failed calls keep the upstream
/// error text for the terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    SearchFailed(String),
    NoResults,
    WrongResultType,
    AddFailed(String),
}

impl NotFoundReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundReason::SearchFailed(_) => "search failed",
            NotFoundReason::NoResults => "no results",
            NotFoundReason::WrongResultType => "wrong result type",
            NotFoundReason::AddFailed(_) => "add failed",
        }
    }
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::SearchFailed(detail) | NotFoundReason::AddFailed(detail) => {
                write!(f, "{} ({})", self.as_str(), detail)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found(String),
    NotFound(NotFoundReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedTrack {
    pub track: TrackRecord,
    pub reason: NotFoundReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub found: usize,
    pub not_found: usize,
    pub unmatched: Vec<UnmatchedTrack>,
}

impl ImportSummary {
    pub fn record(&mut self, track: &TrackRecord, result: &MatchResult) {
        match result {
            MatchResult::Found(_) => self.found += 1,
            MatchResult::NotFound(reason) => {
                self.not_found += 1;
                self.unmatched.push(UnmatchedTrack {
                    track: track.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.found, self.not_found)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub tracks: usize,
    pub path: PathBuf,
}

#[derive(Tabled)]
pub struct UnmatchedTableRow {
    pub name: String,
    pub artist: String,
    pub reason: String,
}

impl From<&UnmatchedTrack> for UnmatchedTableRow {
    fn from(unmatched: &UnmatchedTrack) -> Self {
        Self {
            name: unmatched.track.name().to_string(),
            artist: unmatched.track.primary_artist().unwrap_or("-").to_string(),
            reason: unmatched.reason.as_str().to_string(),
        }
    }
}
