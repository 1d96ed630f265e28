use serde::{Deserialize, Serialize};

/// Core audio dimensions, nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Instrumentalness,
    Speechiness,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Danceability,
        Dimension::Energy,
        Dimension::Valence,
        Dimension::Acousticness,
        Dimension::Instrumentalness,
        Dimension::Speechiness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Danceability => "danceability",
            Dimension::Energy => "energy",
            Dimension::Valence => "valence",
            Dimension::Acousticness => "acousticness",
            Dimension::Instrumentalness => "instrumentalness",
            Dimension::Speechiness => "speechiness",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Dimension::Danceability => "How suitable for dancing (rhythm, tempo, beat strength)",
            Dimension::Energy => "Perceptual intensity and activity",
            Dimension::Valence => "Musical positiveness, high is happy, low is sad or angry",
            Dimension::Acousticness => "Confidence the track is acoustic",
            Dimension::Instrumentalness => "Predicts whether a track has no vocals",
            Dimension::Speechiness => "Presence of spoken words",
        }
    }
}

/// Audio descriptors of one track.
///
/// Values are stored as received, even when upstream breaks the nominal range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub liveness: f64,
    /// beats per minute
    pub tempo: f64,
    /// decibels
    pub loudness: f64,
}

impl FeatureVector {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Danceability => self.danceability,
            Dimension::Energy => self.energy,
            Dimension::Valence => self.valence,
            Dimension::Acousticness => self.acousticness,
            Dimension::Instrumentalness => self.instrumentalness,
            Dimension::Speechiness => self.speechiness,
        }
    }
}

/// Why a feature-based view does or does not have data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureAvailability {
    Available,
    /// upstream refused the audio-feature lookup
    CapabilityUnavailable,
    /// lookup worked, but no row carries a vector
    InsufficientData,
}
