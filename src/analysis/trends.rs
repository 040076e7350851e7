//! Per-year trend series

use super::Mean;
use crate::MatchRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Year to value, ascending by year. Only years with at least one selected
/// match appear.
pub type YearSeries = BTreeMap<u16, f64>;

/// Running means for a single year
#[derive(Debug, Clone, Default)]
struct YearAccumulator {
    points: Mean,
    high_scoring: Mean,
    bonus: Mean,
    score_diff: Mean,
    close: Mean,
}

impl YearAccumulator {
    fn update(&mut self, record: &MatchRecord) {
        self.points.push(record.total_points() as f64);
        self.high_scoring.push_flag(record.is_high_scoring());
        self.bonus.push(record.total_bonus() as f64);
        self.score_diff.push(record.score_diff() as f64);
        self.close.push_flag(record.is_close());
    }
}

/// The five year-indexed series behind the offensive and balance charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearTrends {
    /// Mean combined score per match
    pub total_points: YearSeries,
    /// Fraction of matches above the high-scoring threshold (0-1)
    pub high_scoring_rate: YearSeries,
    /// Mean bonus points per match
    pub total_bonus: YearSeries,
    /// Mean absolute margin
    pub score_diff: YearSeries,
    /// Fraction of close matches (0-1)
    pub close_match_rate: YearSeries,
}

impl YearTrends {
    pub fn compute(rows: &[&MatchRecord]) -> Self {
        let mut by_year: BTreeMap<u16, YearAccumulator> = BTreeMap::new();
        for record in rows {
            by_year.entry(record.year()).or_default().update(record);
        }

        let mut trends = YearTrends::default();
        for (year, acc) in by_year {
            // Every accumulator saw at least one match, so every mean exists
            let series = [
                (&mut trends.total_points, acc.points),
                (&mut trends.high_scoring_rate, acc.high_scoring),
                (&mut trends.total_bonus, acc.bonus),
                (&mut trends.score_diff, acc.score_diff),
                (&mut trends.close_match_rate, acc.close),
            ];
            for (target, mean) in series {
                if let Some(value) = mean.value() {
                    target.insert(year, value);
                }
            }
        }
        trends
    }

    pub fn is_empty(&self) -> bool {
        self.total_points.is_empty()
    }

    /// Years covered by the series
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.total_points.keys().copied()
    }
}
