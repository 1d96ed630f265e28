use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub total_tracks: u32,
    pub owner: String,
    pub image_url: Option<String>,
}

/// The connected account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub followers: u64,
    pub country: Option<String>,
    pub plan: Option<String>,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
}
