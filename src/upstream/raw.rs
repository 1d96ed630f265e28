//! Record shapes as the upstream API returns them.
//!
//! Everything is lenient: missing fields fall back to defaults, and a list
//! item that does not decode at all becomes [`Lenient::Malformed`] instead of
//! failing the whole page. Deciding what is usable is the normalizer's job.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<Lenient<T>>,
    #[serde(default)]
    pub next: Option<String>,
}

/// One list item, decoded on its own
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Parsed(T),
    /// the decode error
    Malformed(String),
}

impl<T> Lenient<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Lenient::Parsed(item) => Ok(item),
            Lenient::Malformed(reason) => Err(reason),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value(value) {
            Ok(item) => Lenient::Parsed(item),
            Err(e) => Lenient::Malformed(e.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFollowers {
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub followers: RawFollowers,
    pub images: Vec<RawImage>,
    pub external_urls: RawExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawArtist {
    pub id: Option<String>,
    pub name: String,
    pub popularity: u32,
    pub followers: RawFollowers,
    pub genres: Vec<String>,
    pub images: Vec<RawImage>,
    pub external_urls: RawExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawArtistRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAlbum {
    pub name: String,
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTrack {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<RawArtistRef>,
    pub album: RawAlbum,
    pub popularity: u32,
    pub duration_ms: u64,
    pub external_urls: RawExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlayItem {
    pub track: Option<RawTrack>,
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSavedItem {
    pub track: Option<RawTrack>,
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlaylistItem {
    pub track: Option<RawTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTrackCount {
    pub total: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlaylist {
    pub id: Option<String>,
    pub name: String,
    pub tracks: RawTrackCount,
    pub images: Vec<RawImage>,
    pub owner: RawOwner,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub liveness: f64,
    pub tempo: f64,
    pub loudness: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAudioFeaturesResponse {
    pub audio_features: Vec<Option<RawAudioFeatures>>,
}

/// `{"error": {"status": 403, "message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorEnvelope {
    pub error: RawError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawError {
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

/// first image of a list, the largest one upstream
pub fn first_image(images: &[RawImage]) -> Option<String> {
    images.first().map(|i| i.url.clone())
}
