use std::path::Path;

use crate::{
    TransferError, catalog, cli, config, error, info, spotify::SpotifyClient, success,
    types::ExportReport,
};

pub async fn export(output: &Path, open_browser: bool) {
    if let Err(e) = run_export(output, open_browser).await {
        error!("Export failed: {}", e);
    }
}

pub(crate) async fn run_export(
    output: &Path,
    open_browser: bool,
) -> Result<ExportReport, TransferError> {
    let settings = config::spotify_oauth()?;
    let token = cli::authorize("Spotify", settings, open_browser).await?;
    let client = SpotifyClient::from_env(token)?;

    info!("Wait until getting all your songs is finished.");
    let pb = cli::spinner("Fetching saved tracks...");
    let result = catalog::export_catalog(&client, output, |fetched, total| match total {
        Some(total) => pb.set_message(format!("Fetched {fetched}/{total} saved tracks...")),
        None => pb.set_message(format!("Fetched {fetched} saved tracks...")),
    })
    .await;
    pb.finish_and_clear();

    let report = result?;
    success!(
        "Successfully saved {} tracks to '{}'",
        report.tracks,
        report.path.display()
    );
    Ok(report)
}
