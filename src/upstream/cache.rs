//! Time-boxed memoization in front of any [`MusicApi`]
//!
//! Entries are keyed by call name plus arguments and hold the decoded
//! response. Failed calls are never stored. Each lifetime class is a bounded
//! [`moka`] cache that evicts expired entries on its own.

use std::{any::Any, sync::Arc, time::Duration};

use moka::sync::Cache;

use crate::{
    config::CacheConfig,
    domain::window::TimeWindow,
    upstream::{
        MusicApi, UpstreamError,
        raw::{
            Lenient, RawArtist, RawAudioFeatures, RawPlayItem, RawPlaylist, RawPlaylistItem,
            RawProfile, RawSavedItem, RawTrack,
        },
    },
};

type Stored = Arc<dyn Any + Send + Sync>;

pub struct CachedApi<A> {
    inner: A,
    /// `None` when the lifetime is 0
    responses: Option<Cache<String, Stored>>,
    /// listening history goes stale faster than top lists
    history: Option<Cache<String, Stored>>,
}

impl<A: MusicApi> CachedApi<A> {
    pub fn new(inner: A, config: &CacheConfig) -> Self {
        Self::with_lifetimes(
            inner,
            Duration::from_secs(config.ttl_secs),
            Duration::from_secs(config.history_ttl_secs),
            config.max_entries,
        )
    }

    fn with_lifetimes(inner: A, ttl: Duration, history_ttl: Duration, max_entries: u64) -> Self {
        Self {
            inner,
            responses: build_cache(ttl, max_entries),
            history: build_cache(history_ttl, max_entries),
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// number of live responses across both lifetime classes
    #[cfg(test)]
    pub fn len(&self) -> u64 {
        [&self.responses, &self.history]
            .into_iter()
            .flatten()
            .map(|cache| {
                cache.run_pending_tasks();
                cache.entry_count()
            })
            .sum()
    }

    fn memoize<T, F>(
        &self,
        cache: &Option<Cache<String, Stored>>,
        key: String,
        fetch: F,
    ) -> Result<T, UpstreamError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&A) -> Result<T, UpstreamError>,
    {
        let Some(cache) = cache else {
            return fetch(&self.inner);
        };

        if let Some(hit) = cache.get(&key).and_then(|v| v.downcast_ref::<T>().cloned()) {
            log::debug!("cache hit: {key}");
            return Ok(hit);
        }

        log::debug!("cache miss: {key}");
        let value = fetch(&self.inner)?;
        cache.insert(key, Arc::new(value.clone()));
        Ok(value)
    }
}

fn build_cache(ttl: Duration, max_entries: u64) -> Option<Cache<String, Stored>> {
    (!ttl.is_zero()).then(|| {
        Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build()
    })
}

impl<A: MusicApi> MusicApi for CachedApi<A> {
    fn fetch_profile(&self) -> Result<RawProfile, UpstreamError> {
        self.memoize(&self.responses, "fetch_profile()".to_string(), |api| {
            api.fetch_profile()
        })
    }

    fn fetch_top_artists(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawArtist>, UpstreamError> {
        self.memoize(
            &self.responses,
            format!("fetch_top_artists({window}, {limit})"),
            |api| api.fetch_top_artists(window, limit),
        )
    }

    fn fetch_top_tracks(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<RawTrack>, UpstreamError> {
        self.memoize(
            &self.responses,
            format!("fetch_top_tracks({window}, {limit})"),
            |api| api.fetch_top_tracks(window, limit),
        )
    }

    fn fetch_recently_played(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawPlayItem>>, UpstreamError> {
        self.memoize(
            &self.history,
            format!("fetch_recently_played({limit})"),
            |api| api.fetch_recently_played(limit),
        )
    }

    fn fetch_saved_tracks(
        &self,
        limit: usize,
    ) -> Result<Vec<Lenient<RawSavedItem>>, UpstreamError> {
        self.memoize(
            &self.responses,
            format!("fetch_saved_tracks({limit})"),
            |api| api.fetch_saved_tracks(limit),
        )
    }

    fn fetch_playlists(&self) -> Result<Vec<RawPlaylist>, UpstreamError> {
        self.memoize(&self.responses, "fetch_playlists()".to_string(), |api| {
            api.fetch_playlists()
        })
    }

    fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<RawPlaylistItem>, UpstreamError> {
        self.memoize(
            &self.responses,
            format!("fetch_playlist_tracks({playlist_id})"),
            |api| api.fetch_playlist_tracks(playlist_id),
        )
    }

    fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<RawAudioFeatures>>, UpstreamError> {
        self.memoize(
            &self.responses,
            format!("fetch_audio_features({})", track_ids.join(",")),
            |api| api.fetch_audio_features(track_ids),
        )
    }
}
