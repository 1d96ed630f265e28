use serde::{Deserialize, Serialize};

pub const UNKNOWN_GENRE: &str = "Unknown";

/// Represent a ranked artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRow {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub followers: u64,
    pub genres: Vec<String>,
    /// 1-based, dense, in fetch order
    pub rank: u32,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
}

impl ArtistRow {
    pub fn primary_genre(&self) -> &str {
        self.genres
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_GENRE)
    }
}
