//! How far a walk location is from its postcode
//!
//! Postcodes in rural areas can be a long way from where a walk actually
//! meets. Readers are warned with the distance and direction from the
//! postcode to the location.

use crate::config::PostcodeConfig;
use crate::geometry::{CompassPoint, DistanceUnit, GreatCircle};
use crate::models::{LocationKind, WalkLocation};
use serde::{Deserialize, Serialize};

/// Distance bands, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityThresholds {
    /// Below this the postcode is treated as the location itself
    pub close_metres: f64,
    pub near_metres: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            close_metres: 100.0,
            near_metres: 500.0,
        }
    }
}

impl From<&PostcodeConfig> for ProximityThresholds {
    fn from(config: &PostcodeConfig) -> Self {
        Self {
            close_metres: f64::from(config.close_metres),
            near_metres: f64::from(config.near_metres),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProximityClass {
    Close,
    Near,
    Far,
}

/// Distance and direction from a postcode to the location it stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcodeProximity {
    pub postcode: String,
    pub kind: LocationKind,
    /// Whole metres
    pub distance_metres: f64,
    /// Bearing from postcode to location
    pub bearing: f64,
    pub compass: CompassPoint,
    pub class: ProximityClass,
}

impl PostcodeProximity {
    /// Assess a location; `None` when it has no postcode or postcode position
    #[must_use]
    pub fn assess(location: &WalkLocation, thresholds: &ProximityThresholds) -> Option<Self> {
        let postcode = location.postcode.clone()?;
        let from = location.postcode_point()?;
        let to = location.geo_point();

        let km = GreatCircle::distance(from, to, DistanceUnit::Kilometers);
        let distance_metres = (km * 1000.0).round();
        let bearing = GreatCircle::direction(from, to);

        let class = if distance_metres < thresholds.close_metres {
            ProximityClass::Close
        } else if distance_metres < thresholds.near_metres {
            ProximityClass::Near
        } else {
            ProximityClass::Far
        };

        Some(Self {
            postcode,
            kind: location.kind,
            distance_metres,
            bearing,
            compass: GreatCircle::direction_abbreviation(bearing),
            class,
        })
    }

    /// Reader-facing explanation
    #[must_use]
    pub fn note(&self, thresholds: &ProximityThresholds) -> String {
        match self.class {
            ProximityClass::Close => format!(
                "Postcode is within {:.0}m of location",
                thresholds.close_metres
            ),
            ProximityClass::Near | ProximityClass::Far => format!(
                "{} place is {:.0} metres {} of postcode.",
                self.kind,
                self.distance_metres,
                self.compass.name()
            ),
        }
    }

    /// Compact form for link text, e.g. `350 metres NE`
    #[must_use]
    pub fn short_note(&self) -> String {
        format!("{:.0} metres {}", self.distance_metres, self.compass)
    }

    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.class {
            ProximityClass::Close => "distclose",
            ProximityClass::Near => "distnear",
            ProximityClass::Far => "distfar",
        }
    }
}
