//! Walk location model: meeting, start and finish points

use crate::geometry::{GeoPoint, GridPoint};
use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown wherever a location has no time
pub const NO_TIME: &str = "No time";

/// What a location is used for on a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Meeting,
    Start,
    End,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationKind::Meeting => "Meeting",
            LocationKind::Start => "Start",
            LocationKind::End => "End",
        };
        f.write_str(name)
    }
}

/// A point on a walk
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalkLocation {
    /// Free text description, e.g. "Car park by the church"
    #[serde(default)]
    pub description: String,
    /// Time of day at this location; midnight is treated as unset
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// OS grid reference
    #[serde(default)]
    pub grid_ref: String,
    /// OS grid easting in metres
    #[serde(default)]
    pub easting: f64,
    /// OS grid northing in metres
    #[serde(default)]
    pub northing: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub postcode_latitude: Option<f64>,
    #[serde(default)]
    pub postcode_longitude: Option<f64>,
    pub kind: LocationKind,
    /// False when only the general walking area is published
    #[serde(default = "default_exact")]
    pub exact: bool,
}

fn default_exact() -> bool {
    true
}

impl WalkLocation {
    /// Create an exact location with no time, grid or postcode details
    #[must_use]
    pub fn new(kind: LocationKind, latitude: f64, longitude: f64) -> Self {
        Self {
            description: String::new(),
            time: None,
            grid_ref: String::new(),
            easting: 0.0,
            northing: 0.0,
            latitude,
            longitude,
            postcode: None,
            postcode_latitude: None,
            postcode_longitude: None,
            kind,
            exact: true,
        }
    }

    /// Time of day, or `None` when unset or midnight
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        self.time.filter(|t| *t != NaiveTime::MIN)
    }

    /// Time as `10:30am`, or [`NO_TIME`]
    #[must_use]
    pub fn time_hhmm(&self) -> String {
        match self.time() {
            Some(t) => format_hhmm(t),
            None => NO_TIME.to_string(),
        }
    }

    /// Like [`Self::time_hhmm`] but `10am` instead of `10:00am`
    #[must_use]
    pub fn time_hhmm_short(&self) -> String {
        match self.time() {
            Some(t) if t.minute() == 0 => format_hhmm(t).replace(":00", ""),
            Some(t) => format_hhmm(t),
            None => NO_TIME.to_string(),
        }
    }

    /// One line description, e.g. `Meet: 10am @ Church (ST 123 456, BS1 1AA)`
    #[must_use]
    pub fn text_description(&self) -> String {
        let mut text = String::from(match self.kind {
            LocationKind::Meeting => "Meet: ",
            LocationKind::Start if self.exact => "Start: ",
            LocationKind::Start => "Walking area: ",
            LocationKind::End => "Finish: ",
        });

        if self.exact && self.time().is_some() {
            text.push_str(&self.time_hhmm_short());
            text.push_str(" @ ");
        }

        let mut place = self.grid_ref.clone();
        if let Some(postcode) = &self.postcode {
            place.push_str(", ");
            place.push_str(postcode);
        }

        if self.description.is_empty() {
            text.push_str(&place);
        } else {
            text.push_str(&format!("{} ({place})", self.description));
        }
        text
    }

    #[must_use]
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn grid_point(&self) -> GridPoint {
        GridPoint::new(self.easting, self.northing)
    }

    /// Coordinates of the postcode, when known
    #[must_use]
    pub fn postcode_point(&self) -> Option<GeoPoint> {
        match (self.postcode_latitude, self.postcode_longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Earliest usable time of two locations.
    ///
    /// A missing location, or one without a time, defers to the other. So does
    /// a location that only describes a walking area.
    #[must_use]
    pub fn first_time(a: Option<&WalkLocation>, b: Option<&WalkLocation>) -> Option<NaiveTime> {
        match (a, b) {
            (None, None) => None,
            (None, Some(b)) => b.time(),
            (Some(a), None) => a.time(),
            (Some(a), Some(b)) => match (a.time(), b.time()) {
                (None, tb) => tb,
                (ta, None) => ta,
                (Some(_), tb) if !a.exact => tb,
                (ta, Some(_)) if !b.exact => ta,
                (Some(ta), Some(tb)) => Some(ta.min(tb)),
            },
        }
    }

    /// Latest usable time of two locations, with the same deferral rules as
    /// [`Self::first_time`]
    #[must_use]
    pub fn last_time(a: Option<&WalkLocation>, b: Option<&WalkLocation>) -> Option<NaiveTime> {
        match (a, b) {
            (None, None) => None,
            (None, Some(b)) => b.time(),
            (Some(a), None) => a.time(),
            (Some(a), Some(b)) if !a.exact => b.time(),
            (Some(a), Some(b)) if !b.exact => a.time(),
            (Some(a), Some(b)) => a.time().max(b.time()),
        }
    }

    /// Time taken to get from this location to `other`, when both have times
    #[must_use]
    pub fn duration_to(&self, other: &WalkLocation) -> Option<Duration> {
        Some(other.time()? - self.time()?)
    }
}

/// Format a duration as `HH:MMhrs`, ignoring its sign
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().abs();
    format!("{:02}:{:02}hrs", minutes / 60, minutes % 60)
}

fn format_hhmm(time: NaiveTime) -> String {
    time.format("%-I:%M%P").to_string()
}
