//! Aggregates over audio feature vectors.
//!
//! Rows without a vector are left out of every computation here.

use serde::{Deserialize, Serialize};

use crate::domain::{
    features::{Dimension, FeatureVector},
    track::TrackRow,
};

/// bins for the [0, 1] feature histograms
pub const HISTOGRAM_BINS: usize = 15;
/// bins for tempo and loudness, which have no fixed range
pub const VALUE_HISTOGRAM_BINS: usize = 20;
/// maps typical feature spreads onto roughly 0..100
pub const DIVERSITY_SCALE: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionMean {
    pub dimension: Dimension,
    pub mean: f64,
}

/// Average feature vector. Empty when no row has features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RadarProfile {
    pub samples: usize,
    pub values: Vec<DimensionMean>,
}

impl RadarProfile {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.dimension == dimension)
            .map(|v| v.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub name: String,
    pub artist: String,
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub popularity: u32,
    pub quadrant: MoodQuadrant,
}

/// Valence/energy quarter a track falls in, split at 0.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodQuadrant {
    HappyEnergetic,
    AngryIntense,
    SadCalm,
    PeacefulContent,
}

impl MoodQuadrant {
    pub fn of(valence: f64, energy: f64) -> Self {
        match (valence >= 0.5, energy >= 0.5) {
            (true, true) => MoodQuadrant::HappyEnergetic,
            (false, true) => MoodQuadrant::AngryIntense,
            (false, false) => MoodQuadrant::SadCalm,
            (true, false) => MoodQuadrant::PeacefulContent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodQuadrant::HappyEnergetic => "Happy / Energetic",
            MoodQuadrant::AngryIntense => "Angry / Intense",
            MoodQuadrant::SadCalm => "Sad / Calm",
            MoodQuadrant::PeacefulContent => "Peaceful / Content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionHistogram {
    pub dimension: Dimension,
    pub histogram: Histogram,
}

/// Mean and spread of an unbounded value such as tempo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueStats {
    pub mean: f64,
    pub histogram: Histogram,
}

fn vectors(rows: &[TrackRow]) -> impl Iterator<Item = (&TrackRow, &FeatureVector)> {
    rows.iter()
        .filter_map(|row| row.features.as_ref().map(|f| (row, f)))
}

fn dimension_values(rows: &[TrackRow], dimension: Dimension) -> Vec<f64> {
    vectors(rows).map(|(_, f)| f.get(dimension)).collect()
}

pub fn mean_profile(rows: &[TrackRow]) -> RadarProfile {
    let samples = vectors(rows).count();
    if samples == 0 {
        return RadarProfile::default();
    }

    let values = Dimension::ALL
        .into_iter()
        .map(|dimension| DimensionMean {
            dimension,
            mean: mean(&dimension_values(rows, dimension)).unwrap_or_default(),
        })
        .collect();

    RadarProfile { samples, values }
}

pub fn mood_points(rows: &[TrackRow]) -> Vec<MoodPoint> {
    vectors(rows)
        .map(|(row, f)| MoodPoint {
            name: row.name.clone(),
            artist: row.artist_credit(),
            valence: f.valence,
            energy: f.energy,
            danceability: f.danceability,
            popularity: row.popularity,
            quadrant: MoodQuadrant::of(f.valence, f.energy),
        })
        .collect()
}

/// Histogram of one dimension over [0, 1].
///
/// Out-of-range values are counted in the nearest edge bin; the rows keep
/// their original values.
pub fn histogram(rows: &[TrackRow], dimension: Dimension) -> Histogram {
    let mut counts = vec![0; HISTOGRAM_BINS];
    for value in dimension_values(rows, dimension) {
        counts[unit_bin(value, HISTOGRAM_BINS)] += 1;
    }
    Histogram {
        lower: 0.0,
        upper: 1.0,
        counts,
    }
}

pub fn histograms(rows: &[TrackRow]) -> Vec<DimensionHistogram> {
    Dimension::ALL
        .into_iter()
        .map(|dimension| DimensionHistogram {
            dimension,
            histogram: histogram(rows, dimension),
        })
        .collect()
}

pub fn tempo_stats(rows: &[TrackRow]) -> Option<ValueStats> {
    value_stats(&vectors(rows).map(|(_, f)| f.tempo).collect::<Vec<_>>())
}

pub fn loudness_stats(rows: &[TrackRow]) -> Option<ValueStats> {
    value_stats(&vectors(rows).map(|(_, f)| f.loudness).collect::<Vec<_>>())
}

/// Mean plus a histogram spanning the observed range. `None` without values.
pub fn value_stats(values: &[f64]) -> Option<ValueStats> {
    let mean = mean(values)?;
    let lower = values.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = upper - lower;

    let mut counts = vec![0; VALUE_HISTOGRAM_BINS];
    for value in values {
        let bin = if width > 0.0 {
            unit_bin((value - lower) / width, VALUE_HISTOGRAM_BINS)
        } else {
            0
        };
        counts[bin] += 1;
    }

    Some(ValueStats {
        mean,
        histogram: Histogram {
            lower,
            upper,
            counts,
        },
    })
}

/// Spread of the feature vectors, roughly 0 to 100.
///
/// Mean over the core dimensions of the sample standard deviation (n - 1),
/// times [`DIVERSITY_SCALE`], rounded to one decimal (halves to even). 0.0
/// with fewer than two vectors.
pub fn diversity_score(rows: &[TrackRow]) -> f64 {
    if vectors(rows).count() < 2 {
        return 0.0;
    }

    let deviations: Vec<f64> = Dimension::ALL
        .into_iter()
        .filter_map(|dimension| sample_std_dev(&dimension_values(rows, dimension)))
        .collect();

    one_decimal(mean(&deviations).unwrap_or_default() * DIVERSITY_SCALE)
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `None` with fewer than two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// bin of a value in [0, 1], clipping anything outside (and NaN) to the edges
fn unit_bin(value: f64, bins: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    ((value * bins as f64) as usize).min(bins - 1)
}
