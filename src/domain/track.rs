use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Represent a played, saved or ranked track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub popularity: u32,
    pub duration_ms: u64,
    /// present for play and save events
    pub timestamp: Option<DateTime<Utc>>,
    /// present for top lists only
    pub rank: Option<u32>,
    pub features: Option<FeatureVector>,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
}

impl TrackRow {
    /// artist names the way upstream credits them, e.g. "A, B"
    pub fn artist_credit(&self) -> String {
        self.artists.join(", ")
    }

    pub fn duration_minutes(&self) -> f64 {
        (self.duration_ms as f64 / 600.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Play,
    Save,
}

/// A track together with the moment it was played or saved.
///
/// Hour, weekday and date are derived once, in UTC, when the event is built.
/// [`PlayEvent::new`] is the only way to get one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayEvent {
    track: TrackRow,
    kind: EventKind,
    at: DateTime<Utc>,
    hour: u32,
    day_of_week: u32,
    date: NaiveDate,
}

impl PlayEvent {
    pub fn new(mut track: TrackRow, kind: EventKind, at: DateTime<Utc>) -> Self {
        track.timestamp = Some(at);
        Self {
            track,
            kind,
            at,
            hour: at.hour(),
            day_of_week: at.weekday().num_days_from_monday(),
            date: at.date_naive(),
        }
    }

    pub fn track(&self) -> &TrackRow {
        &self.track
    }

    /// 0..=23
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// 0 is Monday, 6 is Sunday
    pub fn day_of_week(&self) -> u32 {
        self.day_of_week
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
pub(crate) fn mock_track(id: &str, name: &str, artists: &[&str]) -> TrackRow {
    TrackRow {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: "Album".to_string(),
        popularity: 50,
        duration_ms: 180_000,
        timestamp: None,
        rank: None,
        features: None,
        image_url: None,
        external_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_derives_calendar_fields_once() {
        // 2024-05-05 is a Sunday
        let at = Utc.with_ymd_and_hms(2024, 5, 5, 22, 15, 0).unwrap();
        let event = PlayEvent::new(mock_track("t1", "Song", &["A"]), EventKind::Play, at);

        assert_eq!(event.hour(), 22);
        assert_eq!(event.day_of_week(), 6);
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
        assert_eq!(event.track().timestamp, Some(at));
    }

    #[test]
    fn serialized_event_agrees_with_its_timestamp() -> anyhow::Result<()> {
        let at = DateTime::parse_from_rfc3339("2024-05-06T01:30:00+03:00")?.with_timezone(&Utc);
        let event = PlayEvent::new(mock_track("t1", "Song", &["A"]), EventKind::Save, at);

        let json = serde_json::to_value(&event)?;

        assert_eq!(json["kind"], "save");
        assert_eq!(json["at"], "2024-05-05T22:30:00Z");
        assert_eq!(json["hour"], 22);
        assert_eq!(json["day_of_week"], 6);
        assert_eq!(json["date"], "2024-05-05");

        Ok(())
    }

    #[test]
    fn artist_credit_joins_names() {
        let track = mock_track("t1", "Song", &["A", "B"]);
        assert_eq!(track.artist_credit(), "A, B");
    }

    #[test]
    fn duration_minutes_rounds_to_two_decimals() {
        let mut track = mock_track("t1", "Song", &["A"]);
        track.duration_ms = 215_333;
        assert_eq!(track.duration_minutes(), 3.59);
    }
}
