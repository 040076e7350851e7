//! Immutable in-memory results table

use crate::{Decade, MatchRecord};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Ordered, read-only sequence of match records.
///
/// Cloning is cheap: clones share the same backing slice, so the table can be
/// handed to any number of concurrent aggregation calls without locking.
#[derive(Debug, Clone)]
pub struct MatchTable {
    records: Arc<[MatchRecord]>,
}

impl MatchTable {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        MatchTable {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest year in the table, or None when it is empty
    pub fn year_bounds(&self) -> Option<(u16, u16)> {
        let min = self.records.iter().map(|r| r.year()).min()?;
        let max = self.records.iter().map(|r| r.year()).max()?;
        Some((min, max))
    }

    /// Distinct team names, every home team in order of first appearance
    /// followed by any teams that only ever appear away
    pub fn teams(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let home = self.records.iter().map(|r| r.home_team());
        let away = self.records.iter().map(|r| r.away_team());
        home.chain(away).filter(|team| seen.insert(*team)).collect()
    }

    /// Number of matches in each decade bucket
    pub fn decade_counts(&self) -> BTreeMap<Decade, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.iter() {
            *counts.entry(record.decade()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a MatchTable {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
