//! A programme of walks
//!
//! Holds the walks read from a programme file and answers the questions
//! programme pages ask once the walks are in order.

use crate::Result;
use crate::geometry::GridPoint;
use crate::models::WalkRecord;
use crate::sort::{SortCriterion, WalkSorter};
use chrono::{Datelike, NaiveDate};
use std::path::Path;
use tracing::debug;

/// Consecutive walks falling in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSection<'a> {
    pub year: i32,
    pub month: u32,
    pub walks: &'a [WalkRecord],
}

impl MonthSection<'_> {
    /// Month heading, e.g. `July 2024`
    #[must_use]
    pub fn heading(&self) -> String {
        self.walks
            .first()
            .map(|w| w.walk_date.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

/// An ordered collection of walks
#[derive(Debug, Clone, Default)]
pub struct Walks {
    items: Vec<WalkRecord>,
}

impl Walks {
    #[must_use]
    pub fn new(items: Vec<WalkRecord>) -> Self {
        Self { items }
    }

    /// Read a JSON array of walk records, keeping file order
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let items: Vec<WalkRecord> = serde_json::from_str(&data)?;
        debug!(count = items.len(), file = %path.display(), "Read walks file");
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All walks in their current order
    #[must_use]
    pub fn all_walks(&self) -> &[WalkRecord] {
        &self.items
    }

    /// Stable sort by up to three criteria
    pub fn sort(&mut self, criteria: &[SortCriterion]) {
        WalkSorter::sort_in_place(&mut self.items, criteria);
    }

    /// Cancelled walks, in current order
    pub fn cancelled(&self) -> impl Iterator<Item = &WalkRecord> {
        self.items.iter().filter(|w| w.is_cancelled())
    }

    /// Runs of consecutive walks sharing a year and month.
    ///
    /// Sort by date first; an unsorted programme gives one section per run,
    /// so the same month may appear more than once.
    #[must_use]
    pub fn by_month(&self) -> Vec<MonthSection<'_>> {
        let sections: Vec<MonthSection<'_>> = self
            .items
            .chunk_by(|a, b| month_of(a.walk_date) == month_of(b.walk_date))
            .map(|walks| {
                let (year, month) = month_of(walks[0].walk_date);
                MonthSection { year, month, walks }
            })
            .collect();
        debug!(sections = sections.len(), "Grouped walks by month");
        sections
    }

    /// Walks starting within `radius_km` of a grid position
    pub fn near(&self, centre: GridPoint, radius_km: f64) -> impl Iterator<Item = &WalkRecord> {
        self.items
            .iter()
            .filter(move |w| w.start_location.grid_point().distance_km(&centre) <= radius_km)
    }

    /// Date of the latest walk
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.items.iter().map(|w| w.walk_date).max()
    }
}

impl From<Vec<WalkRecord>> for Walks {
    fn from(items: Vec<WalkRecord>) -> Self {
        Self::new(items)
    }
}

fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalksError;
    use crate::models::{LocationKind, WalkLocation, WalkStatus};

    fn walk(title: &str, year: i32, month: u32, day: u32) -> WalkRecord {
        let start = WalkLocation::new(LocationKind::Start, 51.45, -2.59);
        WalkRecord::new(
            title,
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            start,
            5.0,
        )
    }

    #[test]
    fn test_by_month_after_sort() {
        let mut walks = Walks::new(vec![
            walk("aug", 2024, 8, 3),
            walk("jul-2", 2024, 7, 20),
            walk("jan", 2025, 1, 4),
            walk("jul-1", 2024, 7, 6),
            walk("aug-2", 2024, 8, 3),
        ]);
        walks.sort(&[SortCriterion::Date]);

        let sections = walks.by_month();
        assert_eq!(sections.len(), 3);
        assert_eq!((sections[0].year, sections[0].month), (2024, 7));
        assert_eq!(sections[0].heading(), "July 2024");
        assert_eq!(sections[1].walks.len(), 2);
        // Same date keeps feed order
        assert_eq!(sections[1].walks[0].title, "aug");
        assert_eq!(sections[1].walks[1].title, "aug-2");
        assert_eq!(sections[2].heading(), "January 2025");
    }

    #[test]
    fn test_by_month_empty() {
        assert!(Walks::default().by_month().is_empty());
    }

    #[test]
    fn test_cancelled() {
        let mut cancelled = walk("off", 2024, 7, 6);
        cancelled.status = WalkStatus::Cancelled;
        let walks = Walks::new(vec![walk("on", 2024, 7, 6), cancelled]);
        let titles: Vec<&str> = walks.cancelled().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["off"]);
    }

    #[test]
    fn test_near() {
        let mut close = walk("close", 2024, 7, 6);
        close.start_location.easting = 359_000.0;
        close.start_location.northing = 172_000.0;
        let mut far = walk("far", 2024, 7, 6);
        far.start_location.easting = 380_000.0;
        far.start_location.northing = 190_000.0;

        let walks = Walks::from(vec![close, far]);
        let centre = GridPoint::new(358_000.0, 172_000.0);
        let titles: Vec<&str> = walks.near(centre, 5.0).map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["close"]);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!(
            "walk-programme-walks-{}.json",
            std::process::id()
        ));
        let records = vec![walk("b", 2024, 9, 1), walk("a", 2024, 7, 6)];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let walks = Walks::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();

        let walks = walks.unwrap();
        assert_eq!(walks.len(), 2);
        assert_eq!(walks.all_walks()[0].title, "b");
    }

    #[test]
    fn test_from_json_file_errors() {
        let dir = std::env::temp_dir();
        let missing = dir.join(format!("walk-programme-missing-{}.json", std::process::id()));
        assert!(matches!(
            Walks::from_json_file(&missing),
            Err(WalksError::Io { .. })
        ));

        let bad = dir.join(format!("walk-programme-bad-{}.json", std::process::id()));
        std::fs::write(&bad, r#"{"title": "not a list"}"#).unwrap();
        let result = Walks::from_json_file(&bad);
        std::fs::remove_file(&bad).unwrap();
        assert!(matches!(result, Err(WalksError::Parse { .. })));
    }

    #[test]
    fn test_last_date() {
        let walks = Walks::new(vec![walk("a", 2024, 7, 6), walk("b", 2024, 9, 1)]);
        assert_eq!(walks.last_date(), NaiveDate::from_ymd_opt(2024, 9, 1));
        assert_eq!(Walks::default().last_date(), None);
    }
}
