use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::track::TrackRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStat {
    /// recent artists that are not in the reference set
    pub new_count: usize,
    /// share of recent artists that are new, rounded to a whole percent with
    /// halves going to the even neighbour
    pub discovery_pct: u32,
}

/// Artist credits of a set of rows, matched exactly as upstream names them
pub fn artist_set<'a>(rows: impl IntoIterator<Item = &'a TrackRow>) -> HashSet<String> {
    rows.into_iter().map(TrackRow::artist_credit).collect()
}

pub fn discovery(recent: &HashSet<String>, reference: &HashSet<String>) -> DiscoveryStat {
    let new_count = recent.difference(reference).count();
    let share = new_count as f64 / recent.len().max(1) as f64;
    let discovery_pct = (share * 100.0).round_ties_even() as u32;
    DiscoveryStat {
        new_count,
        discovery_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::track::mock_track;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn two_of_three_new_artists_is_67_percent() {
        let stat = discovery(&set(&["A", "B", "C"]), &set(&["B"]));

        assert_eq!(
            stat,
            DiscoveryStat {
                new_count: 2,
                discovery_pct: 67
            }
        );
    }

    #[test]
    fn half_percent_rounds_to_even() {
        let recent = set(&["A", "B", "C", "D", "E", "F", "G", "H"]);

        // 1/8 = 12.5%, 3/8 = 37.5%
        let one = discovery(&recent, &set(&["B", "C", "D", "E", "F", "G", "H"]));
        let three = discovery(&recent, &set(&["D", "E", "F", "G", "H"]));

        assert_eq!((one.new_count, one.discovery_pct), (1, 12));
        assert_eq!((three.new_count, three.discovery_pct), (3, 38));
    }

    #[test]
    fn empty_recent_set_is_zero() {
        let stat = discovery(&set(&[]), &set(&["B"]));

        assert_eq!(stat.new_count, 0);
        assert_eq!(stat.discovery_pct, 0);
    }

    #[test]
    fn names_match_case_sensitively() {
        let stat = discovery(&set(&["abba"]), &set(&["ABBA"]));

        assert_eq!(stat.new_count, 1);
        assert_eq!(stat.discovery_pct, 100);
    }

    #[test]
    fn artist_set_uses_full_credit() {
        let rows = vec![
            mock_track("t1", "One", &["A", "B"]),
            mock_track("t2", "Two", &["A", "B"]),
            mock_track("t3", "Three", &["A"]),
        ];

        assert_eq!(artist_set(&rows), set(&["A, B", "A"]));
    }
}
