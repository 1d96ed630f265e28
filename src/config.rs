use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub source: SourceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub limits: Limits,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

/// Where the exported upstream responses live
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub export_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

/// Lifetimes of memoized upstream responses, in seconds. 0 disables reuse.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    /// recently played changes faster than everything else
    pub history_ttl_secs: u64,
    /// per lifetime class, least useful entries are evicted beyond this
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            history_ttl_secs: 1800,
            max_entries: 1000,
        }
    }
}

/// How many items each view asks upstream for
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub top_items: usize,
    pub feature_tracks: usize,
    pub recently_played: usize,
    pub saved_tracks: usize,
    pub recent_feed: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_items: 20,
            feature_tracks: 50,
            recently_played: 50,
            saved_tracks: 50,
            recent_feed: 20,
        }
    }
}
