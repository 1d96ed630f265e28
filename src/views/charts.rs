use serde::Serialize;

use crate::{
    config::Limits,
    domain::{artist::ArtistRow, track::TrackRow, window::TimeWindow},
    engine::{
        error::EngineError,
        genres::{GenreCount, genre_histogram},
        normalize,
    },
    upstream::{MusicApi, session::Session},
};

#[derive(Debug, Clone, Serialize)]
pub struct TopChartsView {
    pub window: TimeWindow,
    pub label: &'static str,
    pub artists: Vec<ArtistRow>,
    pub tracks: Vec<TrackRow>,
    pub genres: Vec<GenreCount>,
}

pub fn top_charts<A: MusicApi>(
    session: &Session<A>,
    window: TimeWindow,
    limits: &Limits,
) -> Result<TopChartsView, EngineError> {
    let api = session.api();
    let artists = normalize::top_artists(api.fetch_top_artists(window, limits.top_items)?);
    let tracks = normalize::top_tracks(api.fetch_top_tracks(window, limits.top_items)?);
    let genres = genre_histogram(&artists);

    Ok(TopChartsView {
        window,
        label: window.label(),
        artists,
        tracks,
        genres,
    })
}
