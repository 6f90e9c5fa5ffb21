//! # Catalog Module
//!
//! The transfer pipeline, written against two small seams so the same logic
//! runs against the real services and against test doubles:
//!
//! - [`SavedTracksSource`] - paginated access to the source library
//!   (implemented by [`crate::spotify::SpotifyClient`])
//! - [`PlaylistDestination`] - search and playlist operations on the
//!   destination (implemented by [`crate::tidal::TidalClient`])
//!
//! [`export`] walks every page of the source into [`TrackRecord`]s and
//! [`import`] matches each record on the destination, one track at a time.

use async_trait::async_trait;

use crate::{
    TransferError,
    types::{PlaylistSpec, SavedTracksPage, SearchHit},
};

pub mod export;
pub mod import;

pub use export::{export_catalog, export_saved_tracks};
pub use import::{import_tracks, match_track};

#[async_trait]
pub trait SavedTracksSource: Send + Sync {
    /// URL of the first page, including the page size.
    fn first_page_url(&self) -> String;

    /// Fetches one page. `url` is either [`Self::first_page_url`] or a `next`
    /// link returned by a previous page, used verbatim.
    async fn fetch_page(&self, url: &str) -> Result<SavedTracksPage, TransferError>;
}

#[async_trait]
pub trait PlaylistDestination: Send + Sync {
    /// Creates the playlist and returns its id.
    async fn create_playlist(&self, playlist: &PlaylistSpec) -> Result<String, TransferError>;

    /// Searches the catalog; hits are returned in result order.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, TransferError>;

    async fn add_to_playlist(&self, playlist_id: &str, track_id: &str)
    -> Result<(), TransferError>;
}
