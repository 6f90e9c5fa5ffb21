use std::path::Path;

use crate::{
    TransferError,
    catalog::SavedTracksSource,
    management::CatalogManager,
    types::{ExportReport, TrackRecord},
};

/// Walks every page of the saved-tracks listing, in API order.
///
/// `on_page` is called after each page with the number of tracks collected
/// so far and the total announced by the service, if any. A page that fails
/// to load or to parse aborts the whole export; partial catalogs are never
/// returned.
pub async fn export_saved_tracks<S, F>(
    source: &S,
    mut on_page: F,
) -> Result<Vec<TrackRecord>, TransferError>
where
    S: SavedTracksSource + ?Sized,
    F: FnMut(usize, Option<u64>),
{
    let mut tracks: Vec<TrackRecord> = Vec::new();
    let mut next = Some(source.first_page_url());

    while let Some(url) = next {
        let page = source.fetch_page(&url).await?;
        tracks.extend(page.items.into_iter().map(|item| TrackRecord::from(item.track)));
        on_page(tracks.len(), page.total);

        next = page.next.filter(|n| !n.is_empty());
    }

    Ok(tracks)
}

/// Exports the library and writes it to `path`, replacing any earlier file.
pub async fn export_catalog<S, F>(
    source: &S,
    path: &Path,
    on_page: F,
) -> Result<ExportReport, TransferError>
where
    S: SavedTracksSource + ?Sized,
    F: FnMut(usize, Option<u64>),
{
    let tracks = export_saved_tracks(source, on_page).await?;
    let manager = CatalogManager::new(path, tracks);
    manager.persist().await?;

    Ok(ExportReport {
        tracks: manager.count(),
        path: path.to_path_buf(),
    })
}
