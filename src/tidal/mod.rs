//! # Tidal Integration Module
//!
//! The destination side of a transfer, talking to the Tidal open API
//! (JSON:API style payloads, every call scoped by `countryCode`):
//!
//! - `GET /searchResults/{query}/relationships/tracks` - catalog search
//! - `POST /playlists` - create the target playlist (201 on success)
//! - `POST /playlists/{id}/relationships/items` - append one track (201)
//!
//! Authorization happens through [`crate::oauth`] with the PKCE preset from
//! [`crate::config::tidal_oauth`].

pub mod client;

pub use client::TidalClient;

pub const TRACKS_TYPE: &str = "tracks";
pub const PLAYLISTS_TYPE: &str = "playlists";
