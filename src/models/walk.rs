//! Walk record model

use super::location::WalkLocation;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::{Europe::London, Tz};
use serde::{Deserialize, Serialize};

/// Publication status of a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkStatus {
    #[default]
    Published,
    Cancelled,
}

/// A single scheduled group walk
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalkRecord {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub group_name: String,
    pub walk_date: NaiveDate,
    #[serde(default)]
    pub meet_location: Option<WalkLocation>,
    pub start_location: WalkLocation,
    #[serde(default)]
    pub finish_location: Option<WalkLocation>,
    /// Length in miles; `NaN` when the feed gave none
    #[serde(default = "unknown_distance")]
    pub distance_miles: f64,
    #[serde(default = "unknown_distance")]
    pub distance_km: f64,
    #[serde(default)]
    pub status: WalkStatus,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub national_grade: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub telephone: String,
    /// True when the contact is also leading the walk
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub details_url: Option<String>,
}

fn unknown_distance() -> f64 {
    f64::NAN
}

impl WalkRecord {
    /// Create a published walk with only the fields needed for ordering
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        walk_date: NaiveDate,
        start_location: WalkLocation,
        distance_miles: f64,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            group_name: String::new(),
            walk_date,
            meet_location: None,
            start_location,
            finish_location: None,
            distance_miles,
            distance_km: distance_miles * 1.609_344,
            status: WalkStatus::Published,
            cancellation_reason: None,
            national_grade: String::new(),
            contact_name: String::new(),
            telephone: String::new(),
            is_leader: false,
            details_url: None,
        }
    }

    #[must_use]
    pub fn meet_time(&self) -> Option<NaiveTime> {
        self.meet_location.as_ref().and_then(WalkLocation::time)
    }

    #[must_use]
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_location.time()
    }

    /// The time a walk is listed under: the earlier of meet and start
    #[must_use]
    pub fn sort_time(&self) -> Option<NaiveTime> {
        WalkLocation::first_time(self.meet_location.as_ref(), Some(&self.start_location))
    }

    /// Latest known time, usually the finish
    #[must_use]
    pub fn end_time(&self) -> Option<NaiveTime> {
        WalkLocation::last_time(Some(&self.start_location), self.finish_location.as_ref())
    }

    /// Local start of the walk in UK time; midnight when no time is known
    #[must_use]
    pub fn start_datetime(&self) -> Option<DateTime<Tz>> {
        let time = self.sort_time().unwrap_or(NaiveTime::MIN);
        London
            .from_local_datetime(&self.walk_date.and_time(time))
            .earliest()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == WalkStatus::Cancelled
    }

    /// Distance as `5mi / 8km`, to one decimal place
    #[must_use]
    pub fn distance_text(&self) -> String {
        if !self.distance_miles.is_finite() || !self.distance_km.is_finite() {
            return "distance unknown".to_string();
        }
        format!(
            "{}mi / {}km",
            one_decimal(self.distance_miles),
            one_decimal(self.distance_km)
        )
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
