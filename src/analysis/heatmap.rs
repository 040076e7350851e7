//! Team-by-year heatmap of home scoring
//!
//! Only home matches feed a cell: the value for `(year, team)` is the team's
//! mean home score that year, or 0 if it hosted no match that year. Away
//! performance is deliberately not folded in.

use super::Mean;
use crate::MatchRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Dense year x team grid.
///
/// Rows are the years present in the selection, columns the teams that
/// hosted at least one selected match, both sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamYearMatrix {
    pub years: Vec<u16>,
    pub teams: Vec<String>,
    /// `values[row][col]` for `years[row]` and `teams[col]`
    pub values: Vec<Vec<f64>>,
}

impl TeamYearMatrix {
    pub fn compute(rows: &[&MatchRecord]) -> Self {
        let mut cells: BTreeMap<(u16, &str), Mean> = BTreeMap::new();
        let mut years = BTreeSet::new();
        let mut teams = BTreeSet::new();

        for record in rows {
            years.insert(record.year());
            teams.insert(record.home_team());
            cells
                .entry((record.year(), record.home_team()))
                .or_default()
                .push(record.home_score() as f64);
        }

        let values = years
            .iter()
            .map(|&year| {
                teams
                    .iter()
                    .map(|&team| {
                        cells
                            .get(&(year, team))
                            .and_then(Mean::value)
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        TeamYearMatrix {
            years: years.into_iter().collect(),
            teams: teams.into_iter().map(str::to_string).collect(),
            values,
        }
    }

    /// Cell value, or None if the year or team is not part of the grid
    pub fn get(&self, year: u16, team: &str) -> Option<f64> {
        let row = self.years.binary_search(&year).ok()?;
        let col = self.teams.iter().position(|t| t == team)?;
        Some(self.values[row][col])
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Iterate over every `(year, team, value)` cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (u16, &str, f64)> + '_ {
        self.years.iter().zip(&self.values).flat_map(move |(&year, row)| {
            self.teams
                .iter()
                .zip(row)
                .map(move |(team, &value)| (year, team.as_str(), value))
        })
    }
}
