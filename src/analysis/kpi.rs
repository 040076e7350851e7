//! Headline KPIs over the filtered matches

use super::{round_to, Mean};
use crate::MatchRecord;
use serde::{Deserialize, Serialize};

/// The four scalar KPIs.
///
/// Each value is `None` when the filter selected no matches; an empty
/// selection is a valid outcome, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Mean combined score per match, 2 decimals
    pub avg_total_points: Option<f64>,
    /// Mean absolute margin per match, 2 decimals
    pub avg_score_diff: Option<f64>,
    /// Mean bonus points per match, 2 decimals
    pub avg_total_bonus: Option<f64>,
    /// Share of close matches as a percentage, 1 decimal
    pub close_match_pct: Option<f64>,
}

impl Kpis {
    pub fn compute(rows: &[&MatchRecord]) -> Self {
        let mut points = Mean::default();
        let mut diff = Mean::default();
        let mut bonus = Mean::default();
        let mut close = Mean::default();

        for record in rows {
            points.push(record.total_points() as f64);
            diff.push(record.score_diff() as f64);
            bonus.push(record.total_bonus() as f64);
            close.push_flag(record.is_close());
        }

        Kpis {
            avg_total_points: points.value().map(|v| round_to(v, 2)),
            avg_score_diff: diff.value().map(|v| round_to(v, 2)),
            avg_total_bonus: bonus.value().map(|v| round_to(v, 2)),
            close_match_pct: close.value().map(|v| round_to(v * 100.0, 1)),
        }
    }

    /// True when there was no data to compute any KPI from
    pub fn is_empty(&self) -> bool {
        self.avg_total_points.is_none()
    }
}
