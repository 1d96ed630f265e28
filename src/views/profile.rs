use serde::Serialize;

use crate::{
    domain::playlist::UserProfile,
    upstream::{MusicApi, session::Session},
};

/// Header shown on every page
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: UserProfile,
}

pub fn profile<A: MusicApi>(session: &Session<A>) -> ProfileView {
    ProfileView {
        profile: session.profile().clone(),
    }
}
