use std::time::Duration;

use tokio::time::sleep;

use crate::{
    catalog::PlaylistDestination,
    types::{HitKind, ImportSummary, MatchResult, NotFoundReason, TrackRecord},
    utils,
};

/// Searches one track on the destination and adds the first hit to the
/// playlist. Never fails: every problem becomes a [`MatchResult::NotFound`].
pub async fn match_track<D>(destination: &D, playlist_id: &str, track: &TrackRecord) -> MatchResult
where
    D: PlaylistDestination + ?Sized,
{
    let query = utils::search_query(track);

    let hits = match destination.search(&query).await {
        Ok(hits) => hits,
        Err(e) => return MatchResult::NotFound(NotFoundReason::SearchFailed(e.to_string())),
    };

    // first result only, no scoring against album or duration
    let Some(candidate) = hits.into_iter().next() else {
        return MatchResult::NotFound(NotFoundReason::NoResults);
    };

    if candidate.kind != HitKind::Track {
        return MatchResult::NotFound(NotFoundReason::WrongResultType);
    }

    match destination
        .add_to_playlist(playlist_id, &candidate.id)
        .await
    {
        Ok(()) => MatchResult::Found(candidate.id),
        Err(e) => MatchResult::NotFound(NotFoundReason::AddFailed(e.to_string())),
    }
}

/// Matches every track in order, waiting `pacing` between two tracks.
///
/// One track's failure never stops the run. `on_result` sees every outcome
/// as soon as it is known.
pub async fn import_tracks<D, F>(
    destination: &D,
    playlist_id: &str,
    tracks: &[TrackRecord],
    pacing: Duration,
    mut on_result: F,
) -> ImportSummary
where
    D: PlaylistDestination + ?Sized,
    F: FnMut(&TrackRecord, &MatchResult),
{
    let mut summary = ImportSummary::default();

    for (index, track) in tracks.iter().enumerate() {
        if index > 0 && !pacing.is_zero() {
            sleep(pacing).await;
        }

        let result = match_track(destination, playlist_id, track).await;
        on_result(track, &result);
        summary.record(track, &result);
    }

    summary
}
