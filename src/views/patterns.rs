use serde::Serialize;

use crate::{
    config::Limits,
    domain::track::{PlayEvent, TrackRow},
    engine::{
        discovery::{DiscoveryStat, artist_set, discovery},
        error::EngineError,
        normalize,
        summary::{ListeningSummary, listening_summary},
        temporal::{self, ActivityHeatmap, DatedCount, MonthlyCount},
    },
    upstream::{MusicApi, session::Session},
};

/// When and how the account listens, and how the library grew
#[derive(Debug, Clone, Serialize)]
pub struct ListeningPatternsView {
    pub summary: ListeningSummary,
    pub heatmap: ActivityHeatmap,
    pub peak_hour: Option<u32>,
    pub peak_day: Option<u32>,
    pub peak_day_name: Option<&'static str>,
    /// most recent plays first
    pub recent: Vec<TrackRow>,
    /// play records dropped for a missing or broken timestamp
    pub skipped: usize,
    pub library: LibrarySection,
}

/// The saved-library part of the page loads separately and may fail alone
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LibrarySection {
    Loaded {
        daily: Vec<DatedCount>,
        monthly: Vec<MonthlyCount>,
        /// `None` while the library holds no saves
        discovery: Option<DiscoveryStat>,
    },
    Failed {
        reason: String,
    },
}

pub fn listening_patterns<A: MusicApi>(
    session: &Session<A>,
    limits: &Limits,
) -> Result<ListeningPatternsView, EngineError> {
    let plays = normalize::play_events(
        session
            .api()
            .fetch_recently_played(limits.recently_played)?,
    );
    let events = plays.rows;
    let peak_day = temporal::peak_day(&events);

    Ok(ListeningPatternsView {
        summary: listening_summary(&events),
        heatmap: temporal::heatmap(&events),
        peak_hour: temporal::peak_hour(&events),
        peak_day,
        peak_day_name: peak_day.map(temporal::day_name),
        recent: events
            .iter()
            .take(limits.recent_feed)
            .map(|event| event.track().clone())
            .collect(),
        skipped: plays.rejected.len(),
        library: library(session, limits, &events),
    })
}

fn library<A: MusicApi>(
    session: &Session<A>,
    limits: &Limits,
    plays: &[PlayEvent],
) -> LibrarySection {
    let saves = match session.api().fetch_saved_tracks(limits.saved_tracks) {
        Ok(raw) => normalize::save_events(raw).rows,
        Err(e) => {
            log::warn!("could not load saved tracks: {e}");
            return LibrarySection::Failed {
                reason: e.to_string(),
            };
        }
    };

    let discovery = (!saves.is_empty()).then(|| {
        discovery(
            &artist_set(plays.iter().map(PlayEvent::track)),
            &artist_set(saves.iter().map(PlayEvent::track)),
        )
    });

    LibrarySection::Loaded {
        daily: temporal::daily_counts(&saves),
        monthly: temporal::monthly_counts(&saves),
        discovery,
    }
}
