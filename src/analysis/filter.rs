//! Filter criteria applied before every aggregation

use crate::{MatchRecord, MatchTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive year range. A range with `min > max` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: u16,
    pub max: u16,
}

impl YearRange {
    pub fn new(min: u16, max: u16) -> Self {
        YearRange { min, max }
    }

    pub fn single(year: u16) -> Self {
        YearRange {
            min: year,
            max: year,
        }
    }

    pub fn contains(&self, year: u16) -> bool {
        self.min <= year && year <= self.max
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The whole parameter surface of an aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub year_range: YearRange,
    /// Restrict to matches this team played, home or away
    pub team: Option<String>,
}

impl FilterCriteria {
    pub fn new(year_range: YearRange) -> Self {
        FilterCriteria {
            year_range,
            team: None,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// All years in the table, all teams.
    ///
    /// An empty table yields the empty range `1..=0`.
    pub fn full_range(table: &MatchTable) -> Self {
        let (min, max) = table.year_bounds().unwrap_or((1, 0));
        FilterCriteria::new(YearRange::new(min, max))
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.year_range.contains(record.year())
            && self.team.as_deref().map_or(true, |team| record.involves(team))
    }

    /// Records that pass the filter, in table order
    pub fn apply<'a>(&self, table: &'a MatchTable) -> Vec<&'a MatchRecord> {
        table.iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.team {
            Some(team) => write!(f, "{} ({})", self.year_range, team),
            None => write!(f, "{} (all teams)", self.year_range),
        }
    }
}
