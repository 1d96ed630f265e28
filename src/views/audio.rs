use serde::Serialize;

use crate::{
    config::Limits,
    domain::{features::FeatureAvailability, window::TimeWindow},
    engine::{
        error::EngineError,
        features::{self, DimensionHistogram, MoodPoint, RadarProfile, ValueStats},
        normalize,
    },
    upstream::{MusicApi, session::Session},
};

/// Sonic profile of the top tracks in a window
#[derive(Debug, Clone, Serialize)]
pub struct AudioFeaturesView {
    pub window: TimeWindow,
    pub label: &'static str,
    pub availability: FeatureAvailability,
    pub tracks: usize,
    pub profile: RadarProfile,
    pub mood_points: Vec<MoodPoint>,
    pub histograms: Vec<DimensionHistogram>,
    pub tempo: Option<ValueStats>,
    pub loudness: Option<ValueStats>,
}

pub fn audio_features<A: MusicApi>(
    session: &Session<A>,
    window: TimeWindow,
    limits: &Limits,
) -> Result<AudioFeaturesView, EngineError> {
    let rows = normalize::top_tracks(
        session
            .api()
            .fetch_top_tracks(window, limits.feature_tracks)?,
    );
    let batch = super::with_features(session, rows)?;
    let profile = features::mean_profile(&batch.rows);
    let availability = super::availability(&batch, &profile);

    Ok(AudioFeaturesView {
        window,
        label: window.label(),
        availability,
        tracks: batch.rows.len(),
        mood_points: features::mood_points(&batch.rows),
        histograms: features::histograms(&batch.rows),
        tempo: features::tempo_stats(&batch.rows),
        loudness: features::loudness_stats(&batch.rows),
        profile,
    })
}
