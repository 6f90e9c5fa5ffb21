use std::path::Path;

use crate::{cli, error, info, types::PlaylistSpec};

/// Export followed by import, sharing one catalog file.
pub async fn transfer(
    file: &Path,
    country: Option<String>,
    playlist: &PlaylistSpec,
    open_browser: bool,
) {
    if let Err(e) = cli::export::run_export(file, open_browser).await {
        error!("Export failed: {}", e);
    }

    info!("Export finished, continuing with the Tidal import.");
    match cli::import::run_import(file, country, playlist, open_browser).await {
        Ok(summary) => cli::import::print_summary(&summary),
        Err(e) => error!("Import failed: {}", e),
    }
}
