//! Bucketing of play and save events over time

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::track::PlayEvent;

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Play counts indexed `[day_of_week][hour]`, Monday first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActivityHeatmap {
    pub cells: [[u32; 24]; 7],
}

impl ActivityHeatmap {
    pub fn get(&self, day_of_week: u32, hour: u32) -> u32 {
        self.cells[day_of_week as usize][hour as usize]
    }

    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// plays per hour across all days
    pub fn hour_totals(&self) -> [u32; 24] {
        let mut totals = [0; 24];
        for row in &self.cells {
            for (hour, count) in row.iter().enumerate() {
                totals[hour] += count;
            }
        }
        totals
    }

    /// plays per day across all hours
    pub fn day_totals(&self) -> [u32; 7] {
        self.cells.map(|row| row.iter().sum())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

pub fn heatmap(events: &[PlayEvent]) -> ActivityHeatmap {
    let mut map = ActivityHeatmap::default();
    for event in events {
        map.cells[event.day_of_week() as usize][event.hour() as usize] += 1;
    }
    map
}

/// Most frequent hour, the earliest one on ties. `None` without events.
pub fn peak_hour(events: &[PlayEvent]) -> Option<u32> {
    mode(&heatmap(events).hour_totals())
}

/// Most frequent weekday (0 is Monday), the earliest one on ties.
pub fn peak_day(events: &[PlayEvent]) -> Option<u32> {
    mode(&heatmap(events).day_totals())
}

pub fn day_name(day_of_week: u32) -> &'static str {
    DAYS[day_of_week as usize % DAYS.len()]
}

/// Events per calendar day, oldest first
pub fn daily_counts(events: &[PlayEvent]) -> Vec<DatedCount> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.date()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DatedCount { date, count })
        .collect()
}

/// Events per calendar month, oldest first
pub fn monthly_counts(events: &[PlayEvent]) -> Vec<MonthlyCount> {
    let mut counts = BTreeMap::new();
    for event in events {
        let date = event.date();
        *counts.entry((date.year(), date.month())).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}

/// index of the largest count, scanning in index order so ties keep the first
fn mode(counts: &[u32]) -> Option<u32> {
    let mut best: Option<(usize, u32)> = None;
    for (index, &count) in counts.iter().enumerate() {
        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((index, count));
        }
    }
    best.map(|(index, _)| index as u32)
}
