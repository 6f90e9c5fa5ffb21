use std::path::Path;

use tabled::Table;

use crate::{
    TransferError,
    catalog::{self, PlaylistDestination},
    cli, config, error, info,
    management::CatalogManager,
    success,
    tidal::TidalClient,
    types::{ImportSummary, MatchResult, PlaylistSpec, UnmatchedTableRow},
    warning,
};

pub async fn import(
    input: &Path,
    country: Option<String>,
    playlist: &PlaylistSpec,
    open_browser: bool,
) {
    match run_import(input, country, playlist, open_browser).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => error!("Import failed: {}", e),
    }
}

pub(crate) async fn run_import(
    input: &Path,
    country: Option<String>,
    playlist: &PlaylistSpec,
    open_browser: bool,
) -> Result<ImportSummary, TransferError> {
    // read the catalog before asking the user to log in
    let library = CatalogManager::load(input).await?;
    info!(
        "Loaded {} tracks from '{}'",
        library.count(),
        library.path().display()
    );

    let settings = config::tidal_oauth()?;
    let token = cli::authorize("Tidal", settings, open_browser).await?;
    let client = TidalClient::from_env(country, token)?;

    let playlist_id = client.create_playlist(playlist).await?;
    success!("Playlist '{}' created successfully.", playlist.name);

    info!(
        "Searching {} tracks on Tidal (country {})...",
        library.count(),
        client.country_code()
    );
    let pb = cli::progress_bar(library.count() as u64);
    let summary = catalog::import_tracks(
        &client,
        &playlist_id,
        library.tracks(),
        config::IMPORT_PACING,
        |track, result| {
            let artist = track.primary_artist().unwrap_or("unknown artist");
            match result {
                MatchResult::Found(id) => pb.suspend(|| {
                    success!("Added '{}' by '{}' \t ID: {}", track.name(), artist, id)
                }),
                MatchResult::NotFound(reason) => pb.suspend(|| {
                    warning!("Skipped '{}' by '{}': {}", track.name(), artist, reason)
                }),
            }
            pb.inc(1);
        },
    )
    .await;
    pb.finish_and_clear();

    Ok(summary)
}

pub(crate) fn print_summary(summary: &ImportSummary) {
    let (found, not_found) = summary.counts();
    info!("=========================");
    info!("Tracks found: {}", found);
    info!("Tracks not found: {}", not_found);
    info!("=========================");

    if !summary.unmatched.is_empty() {
        let rows: Vec<UnmatchedTableRow> =
            summary.unmatched.iter().map(UnmatchedTableRow::from).collect();
        println!("{}", Table::new(rows));
    }

    success!("Done! You can now check your Tidal playlist.");
}
