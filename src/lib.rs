//! Six Nations match statistics
//!
//! Loads the historical Six Nations results table once, then answers filtered
//! questions about it: headline KPIs, per-year trends, team rankings and a
//! team-by-year heatmap.

pub mod analysis;
pub mod data;
pub mod report;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use analysis::{aggregate, AggregateResult, FilterCriteria, YearRange};
pub use data::{LoadError, MatchTable, TableCache};

/// Combined score above which a match counts as high scoring
pub const HIGH_SCORING_THRESHOLD: u32 = 45;

/// Largest margin that still counts as a close match
pub const CLOSE_MATCH_MARGIN: u16 = 7;

/// Coarse grouping of match years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Decade {
    #[serde(rename = "2000s")]
    Noughties,
    #[serde(rename = "2010s")]
    Tens,
    #[serde(rename = "2020s")]
    Twenties,
}

impl Decade {
    pub fn from_year(year: u16) -> Self {
        if year < 2010 {
            Decade::Noughties
        } else if year < 2020 {
            Decade::Tens
        } else {
            Decade::Twenties
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decade::Noughties => "2000s",
            Decade::Tens => "2010s",
            Decade::Twenties => "2020s",
        }
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw facts about one fixture, as read from the source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub date: NaiveDate,
    pub year: u16,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub home_bonus: u16,
    pub away_bonus: u16,
}

/// A single played match together with its derived columns.
///
/// Derived values are computed once in [`MatchRecord::new`] and the struct
/// exposes no way to mutate the raw fields afterwards, so the two can never
/// drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    #[serde(flatten)]
    fixture: Fixture,
    total_points: u32,
    score_diff: u16,
    high_scoring: bool,
    close_match: bool,
    total_bonus: u32,
    decade: Decade,
}

impl MatchRecord {
    pub fn new(fixture: Fixture) -> Self {
        let total_points = u32::from(fixture.home_score) + u32::from(fixture.away_score);
        let score_diff = fixture.home_score.abs_diff(fixture.away_score);
        MatchRecord {
            total_points,
            score_diff,
            high_scoring: total_points > HIGH_SCORING_THRESHOLD,
            close_match: score_diff <= CLOSE_MATCH_MARGIN,
            total_bonus: u32::from(fixture.home_bonus) + u32::from(fixture.away_bonus),
            decade: Decade::from_year(fixture.year),
            fixture,
        }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn date(&self) -> NaiveDate {
        self.fixture.date
    }

    pub fn year(&self) -> u16 {
        self.fixture.year
    }

    pub fn home_team(&self) -> &str {
        &self.fixture.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.fixture.away_team
    }

    pub fn home_score(&self) -> u16 {
        self.fixture.home_score
    }

    pub fn away_score(&self) -> u16 {
        self.fixture.away_score
    }

    pub fn home_bonus(&self) -> u16 {
        self.fixture.home_bonus
    }

    pub fn away_bonus(&self) -> u16 {
        self.fixture.away_bonus
    }

    /// Combined score of both sides
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Absolute winning margin
    pub fn score_diff(&self) -> u16 {
        self.score_diff
    }

    pub fn is_high_scoring(&self) -> bool {
        self.high_scoring
    }

    pub fn is_close(&self) -> bool {
        self.close_match
    }

    /// Bonus points earned by both sides
    pub fn total_bonus(&self) -> u32 {
        self.total_bonus
    }

    pub fn decade(&self) -> Decade {
        self.decade
    }

    /// Check if the given team played in this match, home or away
    pub fn involves(&self, team: &str) -> bool {
        self.fixture.home_team == team || self.fixture.away_team == team
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to load match data: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum number of teams listed in the ranking table
    pub rank_limit: Option<usize>,
    pub show_heatmap: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            rank_limit: None,
            show_heatmap: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                csv_path: "data/rugby_six_nations.csv".to_string(),
            },
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| DashboardError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DashboardError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(year: u16, home_score: u16, away_score: u16) -> Fixture {
        Fixture {
            date: NaiveDate::from_ymd_opt(year as i32, 2, 3).unwrap(),
            year,
            home_team: "England".to_string(),
            away_team: "Italy".to_string(),
            home_score,
            away_score,
            home_bonus: 1,
            away_bonus: 0,
        }
    }

    #[test]
    fn test_derived_fields() {
        let record = MatchRecord::new(fixture(2015, 17, 31));
        assert_eq!(record.total_points(), 48);
        assert_eq!(record.score_diff(), 14);
        assert!(record.is_high_scoring());
        assert!(!record.is_close());
        assert_eq!(record.total_bonus(), 1);
        assert_eq!(record.decade(), Decade::Tens);
    }

    #[test]
    fn test_thresholds_are_inclusive_and_exclusive() {
        // 45 points is not high scoring, a 7 point margin is close
        let record = MatchRecord::new(fixture(2004, 26, 19));
        assert_eq!(record.total_points(), 45);
        assert!(!record.is_high_scoring());
        assert_eq!(record.score_diff(), 7);
        assert!(record.is_close());
    }

    #[test]
    fn test_decade_buckets() {
        assert_eq!(Decade::from_year(2000), Decade::Noughties);
        assert_eq!(Decade::from_year(2009), Decade::Noughties);
        assert_eq!(Decade::from_year(2010), Decade::Tens);
        assert_eq!(Decade::from_year(2019), Decade::Tens);
        assert_eq!(Decade::from_year(2020), Decade::Twenties);
        assert_eq!(Decade::from_year(2024).to_string(), "2020s");
    }

    #[test]
    fn test_involves() {
        let record = MatchRecord::new(fixture(2020, 10, 3));
        assert!(record.involves("England"));
        assert!(record.involves("Italy"));
        assert!(!record.involves("Wales"));
    }

    #[test]
    fn test_config_toml_roundtrip_keeps_report_defaults() {
        let parsed: Config = toml::from_str("[data]\ncsv_path = \"x.csv\"\n").unwrap();
        assert_eq!(parsed.data.csv_path, "x.csv");
        assert_eq!(parsed.report, ReportConfig::default());

        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }
}
