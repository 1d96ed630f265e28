use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

/// Lookback period for "top" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// roughly the last 4 weeks
    Recent,
    /// roughly the last 6 months
    #[default]
    Medium,
    /// all time
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Recent, TimeWindow::Medium, TimeWindow::All];

    pub fn token(self) -> &'static str {
        match self {
            TimeWindow::Recent => "recent",
            TimeWindow::Medium => "medium",
            TimeWindow::All => "all",
        }
    }

    /// name of the window in upstream queries
    pub fn upstream_token(self) -> &'static str {
        match self {
            TimeWindow::Recent => "short_term",
            TimeWindow::Medium => "medium_term",
            TimeWindow::All => "long_term",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Recent => "Last 4 weeks",
            TimeWindow::Medium => "Last 6 months",
            TimeWindow::All => "All time",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.token() == token || w.upstream_token() == token)
            .ok_or_else(|| EngineError::InvalidTimeWindow(s.to_string()))
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
