//! Multi-key ordering of walk records
//!
//! Walks are ordered by up to three [`SortCriterion`]s, each ascending. The
//! sort is stable: programme pages group walks by month and insert section
//! headers, and rely on equal walks keeping their feed order.

use crate::error::WalksError;
use crate::models::WalkRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Maximum number of criteria that take part in an ordering
pub const MAX_SORT_KEYS: usize = 3;

/// A field walks can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// Ends the key list
    #[default]
    None,
    Date,
    /// Unset times sort after every set time
    Time,
    /// Distance in miles; unknown distances sort last
    Distance,
}

impl SortCriterion {
    /// Compare two walks on this criterion alone
    #[must_use]
    pub fn compare(self, a: &WalkRecord, b: &WalkRecord) -> Ordering {
        match self {
            SortCriterion::None => Ordering::Equal,
            SortCriterion::Date => a.walk_date.cmp(&b.walk_date),
            SortCriterion::Time => missing_last(a.sort_time(), b.sort_time()),
            SortCriterion::Distance => compare_distance(a.distance_miles, b.distance_miles),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::None => "none",
            SortCriterion::Date => "date",
            SortCriterion::Time => "time",
            SortCriterion::Distance => "distance",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = WalksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(SortCriterion::None),
            "date" => Ok(SortCriterion::Date),
            "time" => Ok(SortCriterion::Time),
            "distance" => Ok(SortCriterion::Distance),
            other => Err(WalksError::validation(format!(
                "Unknown sort criterion '{other}'. Must be one of: none, date, time, distance"
            ))),
        }
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Criteria that actually take part: at most three, up to the first `None`
fn active(criteria: &[SortCriterion]) -> impl Iterator<Item = SortCriterion> + '_ {
    criteria
        .iter()
        .copied()
        .take(MAX_SORT_KEYS)
        .take_while(|c| *c != SortCriterion::None)
}

/// Stable ordering of walk records
pub struct WalkSorter;

impl WalkSorter {
    /// Compare two walks on a composite key
    #[must_use]
    pub fn compare(a: &WalkRecord, b: &WalkRecord, criteria: &[SortCriterion]) -> Ordering {
        active(criteria)
            .map(|criterion| criterion.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Return the records in a new order
    #[must_use]
    pub fn sort(mut records: Vec<WalkRecord>, criteria: &[SortCriterion]) -> Vec<WalkRecord> {
        Self::sort_in_place(&mut records, criteria);
        records
    }

    /// Reorder records held by the caller
    pub fn sort_in_place(records: &mut [WalkRecord], criteria: &[SortCriterion]) {
        let keys: Vec<SortCriterion> = active(criteria).collect();
        debug!(count = records.len(), ?keys, "Sorting walks");
        if keys.is_empty() {
            return;
        }
        // slice::sort_by is a stable merge sort
        records.sort_by(|a, b| Self::compare(a, b, &keys));
    }
}
