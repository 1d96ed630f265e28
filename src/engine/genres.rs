use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::artist::ArtistRow;

pub const TOP_GENRES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Counts every genre of every artist.
///
/// Highest count first, ties in order of first appearance, at most
/// [`TOP_GENRES`] entries.
pub fn genre_histogram(artists: &[ArtistRow]) -> Vec<GenreCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<GenreCount> = vec![];

    for genre in artists.iter().flat_map(|a| &a.genres) {
        match positions.get(genre.as_str()) {
            Some(&index) => counts[index].count += 1,
            None => {
                positions.insert(genre, counts.len());
                counts.push(GenreCount {
                    genre: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_GENRES);
    counts
}
