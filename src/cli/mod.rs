//! # CLI Module
//!
//! The command-line layer of spotidal. Each command authorizes against the
//! service it needs, runs the matching [`crate::catalog`] pipeline and
//! reports progress with the crate's output macros and `indicatif` bars.
//!
//! ## Commands
//!
//! - [`export`] - authorize with Spotify and write the saved tracks catalog
//! - [`import`] - authorize with Tidal, create the playlist and fill it
//! - [`transfer`] - both of the above against the same catalog file
//!
//! Fatal failures end the process through [`crate::error!`]; a track that
//! cannot be matched only produces a warning line.
//!
//! ## Usage
//!
//! ```bash
//! spotidal export --output library.json
//! spotidal import --input library.json --country US
//! spotidal transfer
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod auth;
mod export;
mod import;
mod transfer;

pub use auth::authorize;
pub use export::export;
pub use import::import;
pub use transfer::transfer;

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
