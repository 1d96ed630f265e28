use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::track::{PlayEvent, TrackRow};

/// Headline counts over play events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListeningSummary {
    pub plays: usize,
    pub unique_artists: usize,
    pub unique_tracks: usize,
    pub minutes_listened: u64,
}

/// Headline counts over a track list, e.g. a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectionSummary {
    pub tracks: usize,
    pub unique_artists: usize,
    pub total_minutes: u64,
    pub hours: u64,
    pub minutes: u64,
    pub average_popularity: Option<f64>,
}

pub fn listening_summary(events: &[PlayEvent]) -> ListeningSummary {
    let tracks: Vec<&TrackRow> = events.iter().map(PlayEvent::track).collect();
    let total_ms: u64 = tracks.iter().map(|t| t.duration_ms).sum();

    ListeningSummary {
        plays: events.len(),
        unique_artists: unique(tracks.iter().map(|t| t.artist_credit())),
        unique_tracks: unique(tracks.iter().map(|t| t.name.clone())),
        minutes_listened: total_ms / 60_000,
    }
}

pub fn collection_summary(rows: &[TrackRow]) -> CollectionSummary {
    let total_minutes = rows.iter().map(|t| t.duration_ms).sum::<u64>() / 60_000;
    let average_popularity = if rows.is_empty() {
        None
    } else {
        let sum: u32 = rows.iter().map(|t| t.popularity).sum();
        Some(sum as f64 / rows.len() as f64)
    };

    CollectionSummary {
        tracks: rows.len(),
        unique_artists: unique(rows.iter().map(TrackRow::artist_credit)),
        total_minutes,
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
        average_popularity,
    }
}

/// Rows whose name or artist credit contains `query`, ignoring case.
/// A blank query keeps every row.
pub fn filter_tracks<'a>(rows: &'a [TrackRow], query: &str) -> Vec<&'a TrackRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.name.to_lowercase().contains(&needle)
                || row.artist_credit().to_lowercase().contains(&needle)
        })
        .collect()
}

fn unique(values: impl Iterator<Item = String>) -> usize {
    values.collect::<HashSet<_>>().len()
}
