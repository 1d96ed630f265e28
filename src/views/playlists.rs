use serde::Serialize;

use crate::{
    domain::{features::FeatureAvailability, playlist::PlaylistSummary, track::TrackRow},
    engine::{
        error::EngineError,
        features::{self, MoodPoint, RadarProfile},
        normalize,
        summary::{CollectionSummary, collection_summary, filter_tracks},
    },
    upstream::{MusicApi, UpstreamError, session::Session},
};

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistsView {
    pub playlists: Vec<PlaylistSummary>,
}

pub fn playlists<A: MusicApi>(session: &Session<A>) -> Result<PlaylistsView, EngineError> {
    Ok(PlaylistsView {
        playlists: normalize::playlists(session.api().fetch_playlists()?),
    })
}

/// Mood, spread and contents of one playlist
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistAnalysisView {
    pub id: String,
    /// listing entry, absent when the playlist is not in the account's list
    pub playlist: Option<PlaylistSummary>,
    pub summary: CollectionSummary,
    pub availability: FeatureAvailability,
    /// only computed when features are available
    pub diversity: Option<f64>,
    pub mood_points: Vec<MoodPoint>,
    pub profile: RadarProfile,
    pub search: String,
    /// tracks matching `search`, in playlist order
    pub tracks: Vec<TrackRow>,
}

pub fn playlist_analysis<A: MusicApi>(
    session: &Session<A>,
    playlist_id: &str,
    search: &str,
) -> Result<PlaylistAnalysisView, EngineError> {
    let raw = match session.api().fetch_playlist_tracks(playlist_id) {
        Ok(raw) => raw,
        Err(UpstreamError::NotFound(_) | UpstreamError::BadRequest(_)) => {
            return Err(EngineError::PlaylistNotFound(playlist_id.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let playlist = normalize::playlists(session.api().fetch_playlists()?)
        .into_iter()
        .find(|p| p.id == playlist_id);

    let batch = super::with_features(session, normalize::playlist_tracks(raw))?;
    let profile = features::mean_profile(&batch.rows);
    let availability = super::availability(&batch, &profile);
    let diversity = (availability == FeatureAvailability::Available)
        .then(|| features::diversity_score(&batch.rows));

    Ok(PlaylistAnalysisView {
        id: playlist_id.to_string(),
        playlist,
        summary: collection_summary(&batch.rows),
        availability,
        diversity,
        mood_points: features::mood_points(&batch.rows),
        profile,
        search: search.to_string(),
        tracks: filter_tracks(&batch.rows, search)
            .into_iter()
            .cloned()
            .collect(),
    })
}
