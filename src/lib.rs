//! Spotify to Tidal library mover
//!
//! This library moves a user's saved Spotify tracks into a Tidal playlist. It
//! performs the OAuth consent flow against both services through a short-lived
//! local callback server, exports the Spotify library into a JSON catalog and
//! imports that catalog into a freshly created Tidal playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local callback server
//! - `catalog` - Export and import pipelines over the service seams
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - The crate wide error type
//! - `management` - Persisted catalog handling
//! - `oauth` - Authorization-code flow (with and without PKCE)
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (source)
//! - `tidal` - Tidal API client (destination)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use spotidal::{config, cli};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await;
//!     cli::export(Path::new(config::CATALOG_FILE), true).await;
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod oauth;
pub mod server;
pub mod spotify;
pub mod tidal;
pub mod types;
pub mod utils;

pub use errors::TransferError;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used for fatal failures only: the process terminates with exit code 1
/// right after the message is written.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a single track that could not be
/// matched on the destination service.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
