//! In-memory [`MusicApi`] for tests

use std::{collections::HashMap, sync::Mutex};

use crate::{
    domain::window::TimeWindow,
    upstream::{
        MusicApi, UpstreamError,
        raw::{
            Lenient, RawAlbum, RawArtist, RawArtistRef, RawAudioFeatures, RawPlayItem,
            RawPlaylist, RawPlaylistItem, RawProfile, RawSavedItem, RawTrack, RawTrackCount,
        },
    },
};

pub struct FakeApi {
    pub profile: Result<RawProfile, UpstreamError>,
    pub top_artists: Vec<RawArtist>,
    pub top_tracks: Result<Vec<RawTrack>, UpstreamError>,
    pub recently_played: Vec<Lenient<RawPlayItem>>,
    pub saved_tracks: Result<Vec<Lenient<RawSavedItem>>, UpstreamError>,
    pub playlists: Vec<RawPlaylist>,
    pub playlist_tracks: HashMap<String, Vec<RawPlaylistItem>>,
    pub audio_features: Result<HashMap<String, RawAudioFeatures>, UpstreamError>,
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) feature_batches: Mutex<Vec<usize>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            profile: Ok(RawProfile {
                id: "user1".to_string(),
                display_name: Some("Test User".to_string()),
                ..Default::default()
            }),
            top_artists: vec![],
            top_tracks: Ok(vec![]),
            recently_played: vec![],
            saved_tracks: Ok(vec![]),
            playlists: vec![],
            playlist_tracks: HashMap::new(),
            audio_features: Ok(HashMap::new()),
            calls: Mutex::new(vec![]),
            feature_batches: Mutex::new(vec![]),
        }
    }
}

impl FakeApi {
    pub fn with_top_artists(names: &[&str]) -> Self {
        Self {
            top_artists: names
                .iter()
                .enumerate()
                .map(|(i, name)| raw_artist(&format!("a{i}"), name, &[]))
                .collect(),
            ..Default::default()
        }
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == call)
            .count()
    }

    pub fn feature_batches(&self) -> Vec<usize> {
        self.feature_batches.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl MusicApi for FakeApi {
    fn fetch_profile(&self) -> Result<RawProfile, UpstreamError> {
        self.record("fetch_profile");
        self.profile.clone()
    }

    fn fetch_top_artists(
        &self,
        _window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawArtist>, UpstreamError> {
        self.record("fetch_top_artists");
        Ok(self.top_artists.iter().take(limit).cloned().collect())
    }

    fn fetch_top_tracks(
        &self,
        _window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawTrack>, UpstreamError> {
        self.record("fetch_top_tracks");
        self.top_tracks
            .clone()
            .map(|items| items.into_iter().take(limit).collect())
    }

    fn fetch_recently_played(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawPlayItem>>, UpstreamError> {
        self.record("fetch_recently_played");
        Ok(self.recently_played.iter().take(limit).cloned().collect())
    }

    fn fetch_saved_tracks(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawSavedItem>>, UpstreamError> {
        self.record("fetch_saved_tracks");
        self.saved_tracks
            .clone()
            .map(|items| items.into_iter().take(limit).collect())
    }

    fn fetch_playlists(&self) -> Result<Vec<RawPlaylist>, UpstreamError> {
        self.record("fetch_playlists");
        Ok(self.playlists.clone())
    }

    fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<RawPlaylistItem>, UpstreamError> {
        self.record("fetch_playlist_tracks");
        self.playlist_tracks
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound(format!("playlist {playlist_id}")))
    }

    fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>, UpstreamError> {
        self.record("fetch_audio_features");
        self.feature_batches.lock().unwrap().push(track_ids.len());
        let features = self.audio_features.clone()?;
        Ok(track_ids.iter().map(|id| features.get(id).cloned()).collect())
    }
}

pub fn raw_artist(id: &str, name: &str, genres: &[&str]) -> RawArtist {
    RawArtist {
        id: Some(id.to_string()),
        name: name.to_string(),
        popularity: 60,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        ..Default::default()
    }
}

pub fn raw_track(id: &str, name: &str, artists: &[&str]) -> RawTrack {
    RawTrack {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| RawArtistRef {
                id: None,
                name: a.to_string(),
            })
            .collect(),
        album: RawAlbum {
            name: "Album".to_string(),
            images: vec![],
        },
        popularity: 50,
        duration_ms: 180_000,
        ..Default::default()
    }
}

pub fn raw_play(track: RawTrack, played_at: &str) -> Lenient<RawPlayItem> {
    Lenient::Parsed(RawPlayItem {
        track: Some(track),
        played_at: Some(played_at.to_string()),
    })
}

pub fn raw_save(track: RawTrack, added_at: &str) -> Lenient<RawSavedItem> {
    Lenient::Parsed(RawSavedItem {
        track: Some(track),
        added_at: Some(added_at.to_string()),
    })
}

pub fn raw_playlist(id: &str, name: &str, total: u32) -> RawPlaylist {
    RawPlaylist {
        id: Some(id.to_string()),
        name: name.to_string(),
        tracks: RawTrackCount { total },
        ..Default::default()
    }
}

/// features with every core dimension set to `value`
pub fn raw_features(id: &str, value: f64) -> RawAudioFeatures {
    RawAudioFeatures {
        id: id.to_string(),
        danceability: value,
        energy: value,
        valence: value,
        acousticness: value,
        instrumentalness: value,
        speechiness: value,
        liveness: value,
        tempo: 120.0,
        loudness: -8.0,
    }
}
