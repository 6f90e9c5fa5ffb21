//! # Spotify Integration Module
//!
//! The source side of a transfer. Only one endpoint is needed:
//!
//! - `GET /me/tracks` - the user's saved tracks, 50 per page, followed through
//!   the `next` links until the last page.
//!
//! Authorization happens through [`crate::oauth`] with the confidential
//! client preset from [`crate::config::spotify_oauth`].

pub mod tracks;

pub use tracks::{SpotifyClient, parse_saved_tracks_page};
