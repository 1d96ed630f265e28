//! Maps upstream record shapes into canonical rows.
//!
//! Records without an id, or whose track was removed upstream, carry no
//! information and are dropped silently. History records that did not decode
//! or have a bad timestamp are dropped loudly: they end up in
//! [`Batch::rejected`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::{
    domain::{
        artist::ArtistRow,
        features::{FeatureAvailability, FeatureVector},
        playlist::{PlaylistSummary, UserProfile},
        track::{EventKind, PlayEvent, TrackRow},
    },
    engine::error::EngineError,
    upstream::{
        UpstreamError,
        raw::{
            Lenient, RawArtist, RawAudioFeatures, RawPlayItem, RawPlaylist, RawPlaylistItem,
            RawProfile, RawSavedItem, RawTrack, first_image,
        },
    },
};

/// Rows that survived normalization, and why the others did not
#[derive(Debug)]
pub struct Batch<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<EngineError>,
}

#[derive(Debug)]
pub struct FeatureBatch {
    pub rows: Vec<TrackRow>,
    /// either `Available` or `CapabilityUnavailable`
    pub availability: FeatureAvailability,
}

pub fn profile(raw: RawProfile) -> UserProfile {
    UserProfile {
        display_name: raw.display_name.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        followers: raw.followers.total,
        country: raw.country,
        plan: raw.product,
        image_url: first_image(&raw.images),
        external_url: raw.external_urls.spotify,
    }
}

pub fn top_artists(raw: Vec<RawArtist>) -> Vec<ArtistRow> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|artist| {
            let id = non_empty(artist.id.as_deref())?;
            seen.insert(id.to_string()).then_some(artist)
        })
        .zip(1..)
        .map(|(artist, rank)| ArtistRow {
            id: artist.id.unwrap_or_default(),
            name: artist.name,
            popularity: artist.popularity,
            followers: artist.followers.total,
            genres: artist.genres,
            rank,
            image_url: first_image(&artist.images),
            external_url: artist.external_urls.spotify,
        })
        .collect()
}

pub fn top_tracks(raw: Vec<RawTrack>) -> Vec<TrackRow> {
    dedup_tracks(raw.into_iter().filter_map(track))
        .into_iter()
        .zip(1..)
        .map(|(mut row, rank)| {
            row.rank = Some(rank);
            row
        })
        .collect()
}

pub fn playlist_tracks(raw: Vec<RawPlaylistItem>) -> Vec<TrackRow> {
    dedup_tracks(raw.into_iter().filter_map(|item| item.track.and_then(track)))
}

pub fn play_events(raw: Vec<Lenient<RawPlayItem>>) -> Batch<PlayEvent> {
    events(
        raw.into_iter()
            .map(|item| item.into_result().map(|i| (i.track, i.played_at))),
        EventKind::Play,
    )
}

pub fn save_events(raw: Vec<Lenient<RawSavedItem>>) -> Batch<PlayEvent> {
    events(
        raw.into_iter()
            .map(|item| item.into_result().map(|i| (i.track, i.added_at))),
        EventKind::Save,
    )
}

/// Playlists that have an id and at least one track
pub fn playlists(raw: Vec<RawPlaylist>) -> Vec<PlaylistSummary> {
    raw.into_iter()
        .filter(|p| p.tracks.total > 0)
        .filter_map(|p| {
            let id = non_empty(p.id.as_deref())?.to_string();
            Some(PlaylistSummary {
                id,
                name: p.name,
                total_tracks: p.tracks.total,
                owner: p.owner.display_name.unwrap_or_default(),
                image_url: first_image(&p.images),
            })
        })
        .collect()
}

pub fn feature_vectors(raw: Vec<RawAudioFeatures>) -> HashMap<String, FeatureVector> {
    raw.into_iter()
        .filter(|f| !f.id.is_empty())
        .map(|f| {
            (
                f.id,
                FeatureVector {
                    danceability: f.danceability,
                    energy: f.energy,
                    valence: f.valence,
                    acousticness: f.acousticness,
                    instrumentalness: f.instrumentalness,
                    speechiness: f.speechiness,
                    liveness: f.liveness,
                    tempo: f.tempo,
                    loudness: f.loudness,
                },
            )
        })
        .collect()
}

/// Joins feature vectors onto rows by track id.
///
/// A forbidden lookup degrades the whole batch to "no features"; any other
/// upstream error is returned.
pub fn attach_features(
    mut rows: Vec<TrackRow>,
    lookup: Result<Vec<RawAudioFeatures>, UpstreamError>,
) -> Result<FeatureBatch, EngineError> {
    let features = match lookup {
        Ok(features) => feature_vectors(features),
        Err(e) if e.is_capability_unavailable() => {
            log::warn!("audio features unavailable, continuing without them: {e}");
            for row in &mut rows {
                row.features = None;
            }
            return Ok(FeatureBatch {
                rows,
                availability: FeatureAvailability::CapabilityUnavailable,
            });
        }
        Err(e) => return Err(EngineError::UpstreamFailure(e)),
    };

    for row in &mut rows {
        row.features = features.get(&row.id).copied();
    }
    Ok(FeatureBatch {
        rows,
        availability: FeatureAvailability::Available,
    })
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|t| t.with_timezone(&Utc))
}

fn track(raw: RawTrack) -> Option<TrackRow> {
    let id = non_empty(raw.id.as_deref())?.to_string();
    Some(TrackRow {
        id,
        name: raw.name,
        artists: raw.artists.into_iter().map(|a| a.name).collect(),
        album: raw.album.name,
        popularity: raw.popularity,
        duration_ms: raw.duration_ms,
        timestamp: None,
        rank: None,
        features: None,
        image_url: first_image(&raw.album.images),
        external_url: raw.external_urls.spotify,
    })
}

/// keeps the first row of every id
fn dedup_tracks(rows: impl Iterator<Item = TrackRow>) -> Vec<TrackRow> {
    let mut seen = HashSet::new();
    rows.filter(|row| seen.insert(row.id.clone())).collect()
}

/// `Err` items did not decode, the string says why
fn events(
    items: impl Iterator<Item = Result<(Option<RawTrack>, Option<String>), String>>,
    kind: EventKind,
) -> Batch<PlayEvent> {
    let record_kind = match kind {
        EventKind::Play => "play",
        EventKind::Save => "save",
    };

    let mut seen = HashSet::new();
    let mut batch = Batch {
        rows: vec![],
        rejected: vec![],
    };

    for item in items {
        let (raw_track, raw_timestamp) = match item {
            Ok(fields) => fields,
            Err(reason) => {
                batch.rejected.push(malformed(record_kind, reason));
                continue;
            }
        };
        let Some(row) = raw_track.and_then(track) else {
            continue;
        };

        let at = match raw_timestamp.as_deref().map(parse_timestamp) {
            Some(Ok(at)) => at,
            Some(Err(e)) => {
                batch.rejected.push(malformed(
                    record_kind,
                    format!(
                        "track {}: invalid timestamp '{}': {e}",
                        row.id,
                        raw_timestamp.as_deref().unwrap_or_default()
                    ),
                ));
                continue;
            }
            None => {
                batch.rejected.push(malformed(
                    record_kind,
                    format!("track {}: missing timestamp", row.id),
                ));
                continue;
            }
        };

        // the same track played twice is two plays, saved twice is one save
        let key = match kind {
            EventKind::Play => (row.id.clone(), Some(at)),
            EventKind::Save => (row.id.clone(), None),
        };
        if seen.insert(key) {
            batch.rows.push(PlayEvent::new(row, kind, at));
        }
    }

    batch
}

fn malformed(kind: &'static str, reason: String) -> EngineError {
    let err = EngineError::MalformedRecord { kind, reason };
    log::warn!("skipping record: {err}");
    err
}

fn non_empty(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}
