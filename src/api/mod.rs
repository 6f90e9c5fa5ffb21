//! # API Module
//!
//! HTTP handlers for the short-lived local server that receives the OAuth
//! redirect from the identity provider's consent screen.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback`, captures the authorization `code` or the
//!   `error` sent back by Spotify or Tidal and stores it in the shared
//!   [`crate::types::PendingAuthorization`].
//! - [`not_found`] - fallback for every other path.
//!
//! The handlers never talk to the token endpoint themselves; exchanging the
//! code is left to [`crate::oauth`] once the hand-off has been completed.

mod callback;

pub use callback::CALLBACK_PATH;
pub use callback::callback;
pub use callback::not_found;
