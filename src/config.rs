//! Configuration management for spotidal.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Client credentials have no default
//! and are only looked up when an authorization flow needs them, so a missing
//! value surfaces as [`TransferError::ConfigurationMissing`] at first use.
//! Endpoints, redirect URIs and scopes fall back to the public service values.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`spotidal/.env`)
//! 3. `.env` file in the current working directory
//! 4. Built-in defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{TransferError, oauth::OAuthSettings, warning};

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8000/callback";
pub const SPOTIFY_SCOPE: &str = "user-library-read";

pub const TIDAL_AUTH_URL: &str = "https://login.tidal.com/authorize";
pub const TIDAL_TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";
pub const TIDAL_API_URL: &str = "https://openapi.tidal.com/v2";
pub const TIDAL_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const TIDAL_SCOPE: &str = "search.write playlists.write";
pub const TIDAL_COUNTRY_CODE: &str = "DE";

/// Default location of the exported catalog, relative to the working directory.
pub const CATALOG_FILE: &str = "spotify_saved_tracks.json";

pub const AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;
pub const IMPORT_PACING: Duration = Duration::from_millis(100);

/// Loads environment variables from `.env` files.
///
/// The file in the platform specific local data directory is read first,
/// followed by `./.env` (or the first `.env` found in a parent directory).
/// Variables that are already set are never overwritten, so the real
/// environment always wins over both files.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotidal/.env`
/// - macOS: `~/Library/Application Support/spotidal/.env`
/// - Windows: `%LOCALAPPDATA%/spotidal/.env`
///
/// # Errors
///
/// Never fails. Missing files are skipped silently; a file that exists but
/// cannot be read or parsed is reported with a warning naming the file and
/// the offending line, and startup continues with whatever is already set.
///
/// # Example
///
/// ```
/// use spotidal::config;
///
/// #[tokio::main]
/// async fn main() {
///     config::load_env().await;
///     let api = config::spotify_api_url();
/// }
/// ```
pub async fn load_env() {
    let path = data_dir().join(".env");
    if async_fs::metadata(&path).await.is_ok() {
        if let Err(e) = load_env_file(&path) {
            warning!("Skipping environment file: {}", e);
        }
    }

    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => warning!("Skipping environment file ./.env: {}", e),
    }
}

/// Loads a single `.env` file into the process environment.
///
/// # Returns
///
/// - `Ok(true)` when the file was read and applied
/// - `Ok(false)` when there is no file at `path`
///
/// # Errors
///
/// Returns [`TransferError::InvalidConfiguration`] naming the file when it
/// exists but cannot be read or contains a line that is not `KEY=value`.
/// Parsing stops at the first bad line.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use spotidal::config;
///
/// match config::load_env_file(Path::new("/etc/spotidal/.env")) {
///     Ok(true) => println!("loaded"),
///     Ok(false) => println!("no such file"),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn load_env_file(path: &Path) -> Result<bool, TransferError> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(TransferError::InvalidConfiguration(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

/// Returns the local data directory of spotidal.
///
/// This is where the optional `.env` file lives and where the build script
/// drops the `.env.example` template. Falls back to `./spotidal` on
/// platforms without a local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotidal");
    path
}

fn required(name: &'static str) -> Result<String, TransferError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(TransferError::ConfigurationMissing(name)),
    }
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the Spotify client ID.
///
/// Retrieves the `SPOTIFY_CLIENT_ID` environment variable, the identifier of
/// the application registered on Spotify's developer dashboard.
///
/// # Errors
///
/// Returns [`TransferError::ConfigurationMissing`] if the variable is unset
/// or blank.
///
/// # Example
///
/// ```
/// let client_id = spotify_client_id()?; // e.g., "3f2a..."
/// ```
pub fn spotify_client_id() -> Result<String, TransferError> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify client secret.
///
/// Retrieves the `SPOTIFY_CLIENT_SECRET` environment variable. It is sent to
/// the token endpoint during the code exchange and must never show up in
/// logs or terminal output.
///
/// # Errors
///
/// Returns [`TransferError::ConfigurationMissing`] if the variable is unset
/// or blank.
pub fn spotify_client_secret() -> Result<String, TransferError> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the Tidal client ID.
///
/// Retrieves the `TIDAL_CLIENT_ID` environment variable. Tidal is used as a
/// public PKCE client, so no secret accompanies it.
///
/// # Errors
///
/// Returns [`TransferError::ConfigurationMissing`] if the variable is unset
/// or blank.
///
/// # Example
///
/// ```
/// let client_id = tidal_client_id()?; // e.g., "zU4X..."
/// ```
pub fn tidal_client_id() -> Result<String, TransferError> {
    required("TIDAL_CLIENT_ID")
}

/// Returns the Spotify authorization endpoint.
///
/// Reads `SPOTIFY_AUTH_URL`, defaulting to [`SPOTIFY_AUTH_URL`].
pub fn spotify_auth_url() -> String {
    with_default("SPOTIFY_AUTH_URL", SPOTIFY_AUTH_URL)
}

/// Returns the Spotify token endpoint.
///
/// Reads `SPOTIFY_TOKEN_URL`, defaulting to [`SPOTIFY_TOKEN_URL`].
pub fn spotify_token_url() -> String {
    with_default("SPOTIFY_TOKEN_URL", SPOTIFY_TOKEN_URL)
}

/// Returns the base URL of the Spotify Web API.
///
/// Reads `SPOTIFY_API_URL`, defaulting to [`SPOTIFY_API_URL`]. A trailing
/// slash is accepted.
///
/// # Example
///
/// ```
/// let api = spotify_api_url(); // "https://api.spotify.com/v1"
/// ```
pub fn spotify_api_url() -> String {
    with_default("SPOTIFY_API_URL", SPOTIFY_API_URL)
}

/// Returns the redirect URI registered for the Spotify application.
///
/// Reads `SPOTIFY_REDIRECT_URI`, defaulting to [`SPOTIFY_REDIRECT_URI`]. The
/// callback server binds to the host and port of this URI, so the host must
/// be a loopback address or `localhost`.
pub fn spotify_redirect_uri() -> String {
    with_default("SPOTIFY_REDIRECT_URI", SPOTIFY_REDIRECT_URI)
}

/// Returns the space separated Spotify scopes.
///
/// Reads `SPOTIFY_SCOPE`, defaulting to [`SPOTIFY_SCOPE`], which is enough to
/// list saved tracks.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_SCOPE", SPOTIFY_SCOPE)
}

/// Returns the Tidal authorization endpoint.
///
/// Reads `TIDAL_AUTH_URL`, defaulting to [`TIDAL_AUTH_URL`].
pub fn tidal_auth_url() -> String {
    with_default("TIDAL_AUTH_URL", TIDAL_AUTH_URL)
}

/// Returns the Tidal token endpoint.
///
/// Reads `TIDAL_TOKEN_URL`, defaulting to [`TIDAL_TOKEN_URL`].
pub fn tidal_token_url() -> String {
    with_default("TIDAL_TOKEN_URL", TIDAL_TOKEN_URL)
}

/// Returns the base URL of the Tidal open API.
///
/// Reads `TIDAL_API_URL`, defaulting to [`TIDAL_API_URL`].
///
/// # Example
///
/// ```
/// let api = tidal_api_url(); // "https://openapi.tidal.com/v2"
/// ```
pub fn tidal_api_url() -> String {
    with_default("TIDAL_API_URL", TIDAL_API_URL)
}

/// Returns the redirect URI registered for the Tidal application.
///
/// Reads `TIDAL_REDIRECT_URI`, defaulting to [`TIDAL_REDIRECT_URI`]. Like
/// its Spotify counterpart it has to point at this machine.
pub fn tidal_redirect_uri() -> String {
    with_default("TIDAL_REDIRECT_URI", TIDAL_REDIRECT_URI)
}

/// Returns the space separated Tidal scopes.
///
/// Reads `TIDAL_SCOPE`, defaulting to [`TIDAL_SCOPE`]: searching the catalog
/// and writing playlists.
pub fn tidal_scope() -> String {
    with_default("TIDAL_SCOPE", TIDAL_SCOPE)
}

/// Returns the country code Tidal searches are scoped to.
///
/// Reads `TIDAL_COUNTRY_CODE`, defaulting to [`TIDAL_COUNTRY_CODE`]. The
/// `--country` flag takes precedence over both.
///
/// # Example
///
/// ```
/// let country = tidal_country_code(); // "DE"
/// ```
pub fn tidal_country_code() -> String {
    with_default("TIDAL_COUNTRY_CODE", TIDAL_COUNTRY_CODE)
}

/// Confidential authorization-code flow against Spotify (client secret, no PKCE).
pub fn spotify_oauth() -> Result<OAuthSettings, TransferError> {
    Ok(OAuthSettings {
        authorize_url: spotify_auth_url(),
        token_url: spotify_token_url(),
        client_id: spotify_client_id()?,
        client_secret: Some(spotify_client_secret()?),
        redirect_uri: spotify_redirect_uri(),
        scope: spotify_scope(),
        pkce: false,
        extra_params: Vec::new(),
        timeout: AUTHORIZATION_TIMEOUT,
    })
}

/// Public PKCE flow against Tidal.
pub fn tidal_oauth() -> Result<OAuthSettings, TransferError> {
    Ok(OAuthSettings {
        authorize_url: tidal_auth_url(),
        token_url: tidal_token_url(),
        client_id: tidal_client_id()?,
        client_secret: None,
        redirect_uri: tidal_redirect_uri(),
        scope: tidal_scope(),
        pkce: true,
        extra_params: vec![("campaignId".to_string(), "default".to_string())],
        timeout: AUTHORIZATION_TIMEOUT,
    })
}
