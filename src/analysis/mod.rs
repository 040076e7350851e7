//! Aggregation engine
//!
//! A pure function of (table, filter): select the matching records once, then
//! derive every KPI, trend, ranking and heatmap from that selection.

pub mod filter;
pub mod heatmap;
pub mod kpi;
pub mod rankings;
pub mod trends;

pub use filter::{FilterCriteria, YearRange};
pub use heatmap::TeamYearMatrix;
pub use kpi::Kpis;
pub use rankings::{TeamRanking, TeamScoring};
pub use trends::{YearSeries, YearTrends};

use crate::{MatchRecord, MatchTable};
use serde::{Deserialize, Serialize};

/// Running arithmetic mean
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Booleans average as 0/1
    pub(crate) fn push_flag(&mut self, flag: bool) {
        self.push(if flag { 1.0 } else { 0.0 });
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Round half away from zero to the given number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Everything the dashboard shows for one filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub filter: FilterCriteria,
    /// Number of matches that passed the filter
    pub match_count: usize,
    pub kpis: Kpis,
    pub trends: YearTrends,
    pub team_ranking: TeamRanking,
    pub heatmap: TeamYearMatrix,
}

impl AggregateResult {
    /// True when the filter selected no matches
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

/// Run every aggregation over the records selected by `filter`.
///
/// Never fails: a filter that selects nothing produces empty KPIs and series.
pub fn aggregate(table: &MatchTable, filter: &FilterCriteria) -> AggregateResult {
    let rows: Vec<&MatchRecord> = filter.apply(table);
    log::debug!("Aggregating {} of {} matches for {}", rows.len(), table.len(), filter);

    AggregateResult {
        filter: filter.clone(),
        match_count: rows.len(),
        kpis: Kpis::compute(&rows),
        trends: YearTrends::compute(&rows),
        team_ranking: TeamRanking::compute(&rows),
        heatmap: TeamYearMatrix::compute(&rows),
    }
}
