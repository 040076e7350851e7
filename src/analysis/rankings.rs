//! Team offensive rankings
//!
//! A team's score is its mean home score plus its mean away score, each
//! averaged independently over the selection. This is not the mean points per
//! match across all of a team's games. A team that never played at home (or
//! away) in the selection contributes 0 for that half.

use super::Mean;
use crate::MatchRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Home and away scoring for one team
#[derive(Debug, Clone, Default)]
pub struct TeamScoring {
    home: Mean,
    away: Mean,
}

impl TeamScoring {
    /// Mean points scored in home matches
    pub fn avg_home_score(&self) -> Option<f64> {
        self.home.value()
    }

    /// Mean points scored in away matches
    pub fn avg_away_score(&self) -> Option<f64> {
        self.away.value()
    }

    pub fn home_matches(&self) -> usize {
        self.home.count()
    }

    pub fn away_matches(&self) -> usize {
        self.away.count()
    }

    /// Sum of the two independent means, missing halves counted as 0
    pub fn combined(&self) -> f64 {
        self.avg_home_score().unwrap_or(0.0) + self.avg_away_score().unwrap_or(0.0)
    }
}

/// Team name to combined offensive score.
///
/// Iteration is alphabetical; use [`TeamRanking::sorted_desc`] for display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRanking(BTreeMap<String, f64>);

impl TeamRanking {
    pub fn compute(rows: &[&MatchRecord]) -> Self {
        let mut scoring: BTreeMap<&str, TeamScoring> = BTreeMap::new();
        for record in rows {
            scoring
                .entry(record.home_team())
                .or_default()
                .home
                .push(record.home_score() as f64);
            scoring
                .entry(record.away_team())
                .or_default()
                .away
                .push(record.away_score() as f64);
        }

        TeamRanking(
            scoring
                .into_iter()
                .map(|(team, s)| (team.to_string(), s.combined()))
                .collect(),
        )
    }

    pub fn get(&self, team: &str) -> Option<f64> {
        self.0.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(team, score)| (team.as_str(), *score))
    }

    /// Highest score first, ties broken by team name
    pub fn sorted_desc(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
