//! [`MusicApi`] backed by a directory of exported API responses
//!
//! Layout, relative to the export root:
//!
//! - `me.json`
//! - `top/artists_<short_term|medium_term|long_term>.json`
//! - `top/tracks_<...>.json`
//! - `recently_played.json`, `saved_tracks.json`, `playlists.json`
//! - `playlists/<id>.json`, or one file per page under `playlists/<id>/`
//! - `audio_features.json`; when absent the capability counts as unavailable

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::{
    domain::window::TimeWindow,
    upstream::{
        AUDIO_FEATURES_BATCH, MusicApi, UpstreamError,
        raw::{
            Lenient, Page, RawArtist, RawAudioFeatures, RawAudioFeaturesResponse,
            RawErrorEnvelope, RawPlayItem, RawPlaylist, RawPlaylistItem, RawProfile, RawSavedItem,
            RawTrack,
        },
    },
};

const PROFILE: &str = "me.json";
const RECENTLY_PLAYED: &str = "recently_played.json";
const SAVED_TRACKS: &str = "saved_tracks.json";
const PLAYLISTS: &str = "playlists.json";
const PLAYLIST_TRACKS_DIR: &str = "playlists";
const AUDIO_FEATURES: &str = "audio_features.json";

pub struct ExportApi {
    root: PathBuf,
}

impl ExportApi {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read<T: DeserializeOwned>(&self, relative: impl AsRef<Path>) -> Result<T, UpstreamError> {
        read_response(&self.root.join(relative))
    }

    /// first `limit` items of a page, each decoded on its own
    fn read_page<T: DeserializeOwned>(
        &self,
        relative: impl AsRef<Path>,
        limit: usize,
    ) -> Result<Vec<Lenient<T>>, UpstreamError> {
        let page: Page<T> = self.read(relative)?;
        Ok(page.items.into_iter().take(limit).collect())
    }

    /// like [`Self::read_page`], without the items that failed to decode
    fn read_items<T: DeserializeOwned>(
        &self,
        relative: impl AsRef<Path>,
        limit: usize,
    ) -> Result<Vec<T>, UpstreamError> {
        let relative = relative.as_ref();
        let items = self.read_page(relative, limit)?;
        Ok(parsed_only(items, &relative.to_string_lossy()))
    }
}

impl MusicApi for ExportApi {
    fn fetch_profile(&self) -> Result<RawProfile, UpstreamError> {
        self.read(PROFILE)
    }

    fn fetch_top_artists(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawArtist>, UpstreamError> {
        self.read_items(
            Path::new("top").join(format!("artists_{}.json", window.upstream_token())),
            limit,
        )
    }

    fn fetch_top_tracks(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawTrack>, UpstreamError> {
        self.read_items(
            Path::new("top").join(format!("tracks_{}.json", window.upstream_token())),
            limit,
        )
    }

    fn fetch_recently_played(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawPlayItem>>, UpstreamError> {
        self.read_page(RECENTLY_PLAYED, limit)
    }

    fn fetch_saved_tracks(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawSavedItem>>, UpstreamError> {
        self.read_page(SAVED_TRACKS, limit)
    }

    fn fetch_playlists(&self) -> Result<Vec<RawPlaylist>, UpstreamError> {
        self.read_items(PLAYLISTS, usize::MAX)
    }

    fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<RawPlaylistItem>, UpstreamError> {
        if playlist_id.is_empty()
            || playlist_id.contains(['/', '\\'])
            || playlist_id.starts_with('.')
        {
            return Err(UpstreamError::BadRequest(format!(
                "invalid playlist id '{playlist_id}'"
            )));
        }

        let dir = self.root.join(PLAYLIST_TRACKS_DIR);
        let single = dir.join(format!("{playlist_id}.json"));
        if single.is_file() {
            return self.read_items(single, usize::MAX);
        }

        let pages_dir = dir.join(playlist_id);
        if !pages_dir.is_dir() {
            return Err(UpstreamError::NotFound(format!("playlist {playlist_id}")));
        }
        read_pages(&pages_dir)
    }

    fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>, UpstreamError> {
        if track_ids.len() > AUDIO_FEATURES_BATCH {
            return Err(UpstreamError::BadRequest(format!(
                "at most {AUDIO_FEATURES_BATCH} ids per request, got {}",
                track_ids.len()
            )));
        }

        let path = self.root.join(AUDIO_FEATURES);
        if !path.exists() {
            return Err(UpstreamError::Forbidden(
                "audio features are not available for this export".to_string(),
            ));
        }

        let response: RawAudioFeaturesResponse = read_response(&path)?;
        let mut by_id: HashMap<String, RawAudioFeatures> = response
            .audio_features
            .into_iter()
            .flatten()
            .map(|f| (f.id.clone(), f))
            .collect();

        Ok(track_ids.iter().map(|id| by_id.remove(id)).collect())
    }
}

/// Reads every `*.json` page of a directory in file name order.
fn read_pages(dir: &Path) -> Result<Vec<RawPlaylistItem>, UpstreamError> {
    let dir_str = dir.to_string_lossy();
    let pages = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("error while reading pages in {dir_str}, skipping an entry: {err:?}");
                None
            }
        })
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();

    let mut items = Vec::new();
    for path in &pages {
        let page: Page<RawPlaylistItem> = read_response(path)?;
        items.extend(parsed_only(page.items, &path.to_string_lossy()));
    }
    Ok(items)
}

fn parsed_only<T>(items: Vec<Lenient<T>>, source: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Lenient::Parsed(item) => Some(item),
            Lenient::Malformed(reason) => {
                log::warn!("skipping undecodable item in {source}: {reason}");
                None
            }
        })
        .collect()
}

fn read_response<T: DeserializeOwned>(path: &Path) -> Result<T, UpstreamError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_response(&contents).map_err(|e| match e {
        UpstreamError::Decode(reason) => {
            UpstreamError::Decode(format!("{}: {reason}", path.to_string_lossy()))
        }
        other => other,
    })
}

/// Decodes a response body, turning an upstream error envelope into an error.
pub fn parse_response<T: DeserializeOwned>(contents: &str) -> Result<T, UpstreamError> {
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    if value.get("error").is_some() {
        if let Ok(envelope) = serde_json::from_value::<RawErrorEnvelope>(value.clone()) {
            return Err(UpstreamError::from_status(
                envelope.error.status,
                envelope.error.message,
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| UpstreamError::Decode(e.to_string()))
}

fn io_error(path: &Path, err: io::Error) -> UpstreamError {
    match err.kind() {
        io::ErrorKind::NotFound => UpstreamError::NotFound(path.to_string_lossy().into_owned()),
        _ => UpstreamError::Transport(format!("{}: {err}", path.to_string_lossy())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_top_artists_for_window_and_applies_limit() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "top/artists_short_term.json",
            r#"{"items": [
                {"id": "a1", "name": "First", "genres": ["indie"]},
                {"id": "a2", "name": "Second"},
                {"id": "a3", "name": "Third"}
            ], "next": null}"#,
        );

        let api = ExportApi::new(tmp.path());
        let artists = api.fetch_top_artists(TimeWindow::Recent, 2)?;

        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "First");
        assert_eq!(artists[0].genres, vec!["indie".to_string()]);
        assert!(artists[1].genres.is_empty());

        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let api = ExportApi::new(tmp.path());

        let err = api.fetch_recently_played(50).unwrap_err();

        assert!(matches!(err, UpstreamError::NotFound(_)));
    }

    #[test]
    fn error_envelope_maps_to_upstream_error() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "me.json",
            r#"{"error": {"status": 401, "message": "The access token expired"}}"#,
        );
        let api = ExportApi::new(tmp.path());

        let err = api.fetch_profile().unwrap_err();

        assert_eq!(
            err,
            UpstreamError::Unauthorized("The access token expired".to_string())
        );
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "saved_tracks.json", "{not json");
        let api = ExportApi::new(tmp.path());

        let err = api.fetch_saved_tracks(50).unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(msg) if msg.contains("saved_tracks.json")));
    }

    #[test]
    fn bad_history_item_is_kept_as_malformed() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "recently_played.json",
            r#"{"items": [
                {"track": {"id": "t1", "name": "One"}, "played_at": "2024-05-06T08:30:00Z"},
                {"track": {"id": "t2", "name": "Two"}, "played_at": 12345},
                {"track": {"id": "t3", "name": "Three"}, "played_at": "2024-05-06T09:30:00Z"}
            ]}"#,
        );
        let api = ExportApi::new(tmp.path());

        let items = api.fetch_recently_played(50)?;

        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], Lenient::Parsed(_)));
        assert!(matches!(&items[1], Lenient::Malformed(reason) if reason.contains("12345")));
        assert!(matches!(items[2], Lenient::Parsed(_)));

        Ok(())
    }

    #[test]
    fn bad_playlist_item_is_skipped() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "playlists/p3.json",
            r#"{"items": [
                {"track": {"id": "t1", "name": "One"}},
                {"track": {"id": "t2", "name": "Two", "popularity": null}},
                {"track": {"id": "t3", "name": "Three"}}
            ]}"#,
        );
        let api = ExportApi::new(tmp.path());

        let items = api.fetch_playlist_tracks("p3")?;

        let ids: Vec<_> = items
            .iter()
            .filter_map(|i| i.track.as_ref().and_then(|t| t.id.as_deref()))
            .collect();
        assert_eq!(ids, vec!["t1", "t3"]);

        Ok(())
    }

    #[test]
    fn missing_audio_features_means_forbidden() {
        let tmp = TempDir::new().unwrap();
        let api = ExportApi::new(tmp.path());

        let err = api.fetch_audio_features(&ids(&["t1"])).unwrap_err();

        assert!(err.is_capability_unavailable());
    }

    #[test]
    fn audio_features_are_aligned_with_requested_ids() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "audio_features.json",
            r#"{"audio_features": [
                {"id": "t2", "energy": 0.9, "tempo": 128.0},
                null,
                {"id": "t1", "energy": 0.1, "loudness": -7.5}
            ]}"#,
        );
        let api = ExportApi::new(tmp.path());

        let features = api.fetch_audio_features(&ids(&["t1", "missing", "t2"]))?;

        assert_eq!(features.len(), 3);
        assert_eq!(features[0].as_ref().map(|f| f.loudness), Some(-7.5));
        assert!(features[1].is_none());
        assert_eq!(features[2].as_ref().map(|f| f.tempo), Some(128.0));

        Ok(())
    }

    #[test]
    fn audio_features_reject_oversized_batch() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "audio_features.json", r#"{"audio_features": []}"#);
        let api = ExportApi::new(tmp.path());
        let too_many: Vec<String> = (0..101).map(|i| format!("t{i}")).collect();

        let err = api.fetch_audio_features(&too_many).unwrap_err();

        assert!(matches!(err, UpstreamError::BadRequest(_)));
    }

    #[test]
    fn playlist_pages_are_concatenated_in_name_order() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "playlists/p1/page-002.json",
            r#"{"items": [{"track": {"id": "t3", "name": "Three"}}]}"#,
        );
        write(
            tmp.path(),
            "playlists/p1/page-001.json",
            r#"{"items": [{"track": {"id": "t1", "name": "One"}}, {"track": null}]}"#,
        );
        write(tmp.path(), "playlists/p1/notes.txt", "ignored");
        let api = ExportApi::new(tmp.path());

        let items = api.fetch_playlist_tracks("p1")?;

        let names: Vec<_> = items
            .iter()
            .map(|i| i.track.as_ref().map(|t| t.name.as_str()))
            .collect();
        assert_eq!(names, vec![Some("One"), None, Some("Three")]);

        Ok(())
    }

    #[test]
    fn single_file_playlist_is_read() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        write(
            tmp.path(),
            "playlists/p2.json",
            r#"{"items": [{"track": {"id": "t1", "name": "One"}}]}"#,
        );
        let api = ExportApi::new(tmp.path());

        assert_eq!(api.fetch_playlist_tracks("p2")?.len(), 1);

        Ok(())
    }

    #[test]
    fn unknown_or_unsafe_playlist_ids_fail() {
        let tmp = TempDir::new().unwrap();
        let api = ExportApi::new(tmp.path());

        assert!(matches!(
            api.fetch_playlist_tracks("nope").unwrap_err(),
            UpstreamError::NotFound(_)
        ));
        assert!(matches!(
            api.fetch_playlist_tracks("../me").unwrap_err(),
            UpstreamError::BadRequest(_)
        ));
    }
}
