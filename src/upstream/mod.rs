//! Boundary to the music platform API.
//!
//! The engine never talks to the network; it receives fully materialized
//! record lists from a [`MusicApi`] implementation.

use thiserror::Error;

use crate::domain::window::TimeWindow;
use raw::{
    Lenient, RawArtist, RawAudioFeatures, RawPlayItem, RawPlaylist, RawPlaylistItem,
    RawProfile, RawSavedItem, RawTrack,
};

pub mod cache;
pub mod export;
pub mod raw;
pub mod session;
#[cfg(test)]
pub mod testing;

/// Upstream refuses feature lookups with more ids than this
pub const AUDIO_FEATURES_BATCH: usize = 100;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// the account or app may not use this endpoint
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => UpstreamError::BadRequest(message),
            401 => UpstreamError::Unauthorized(message),
            403 => UpstreamError::Forbidden(message),
            404 => UpstreamError::NotFound(message),
            _ => UpstreamError::Status { status, message },
        }
    }

    /// known deprecation or permission condition, callers degrade instead of failing
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self, UpstreamError::Forbidden(_))
    }
}

/// Logical calls the dashboard needs from the platform
pub trait MusicApi: Send + Sync {
    fn fetch_profile(&self) -> Result<RawProfile, UpstreamError>;

    fn fetch_top_artists(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawArtist>, UpstreamError>;

    fn fetch_top_tracks(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawTrack>, UpstreamError>;

    /// History items come back one by one so a broken item can be reported
    /// without losing the rest.
    fn fetch_recently_played(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawPlayItem>>, UpstreamError>;

    fn fetch_saved_tracks(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawSavedItem>>, UpstreamError>;

    fn fetch_playlists(&self) -> Result<Vec<RawPlaylist>, UpstreamError>;

    /// every page of the playlist, concatenated
    fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<RawPlaylistItem>, UpstreamError>;

    /// At most [`AUDIO_FEATURES_BATCH`] ids. The result is aligned with
    /// `track_ids`, `None` where upstream knows no features for the id.
    fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>, UpstreamError>;
}
