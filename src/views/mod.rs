//! View models for the dashboard pages.
//!
//! A builder fetches through the [`Session`], normalizes, runs the
//! aggregators and returns a serializable model. Rendering is left to the
//! CLI and the HTTP server.

use crate::{
    domain::{features::FeatureAvailability, track::TrackRow},
    engine::{
        error::EngineError,
        features::RadarProfile,
        normalize::{self, FeatureBatch},
    },
    upstream::{MusicApi, session::Session},
};

pub mod audio;
pub mod charts;
pub mod patterns;
pub mod playlists;
pub mod profile;

/// Looks up and attaches audio features for `rows`
fn with_features<A: MusicApi>(
    session: &Session<A>,
    rows: Vec<TrackRow>,
) -> Result<FeatureBatch, EngineError> {
    let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    normalize::attach_features(rows, session.audio_features(&ids))
}

/// A working lookup that produced no samples is reported as insufficient data
fn availability(batch: &FeatureBatch, profile: &RadarProfile) -> FeatureAvailability {
    match batch.availability {
        FeatureAvailability::Available if profile.is_empty() => {
            FeatureAvailability::InsufficientData
        }
        other => other,
    }
}
