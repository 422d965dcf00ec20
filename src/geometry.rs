//! Great-circle geometry between latitude/longitude pairs
//!
//! Distances use the haversine formula on a sphere of mean Earth radius.
//! Bearings are initial bearings measured clockwise from true north.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    fn to_haversine(self) -> haversine::Location {
        haversine::Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A position on the Ordnance Survey national grid, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub easting: f64,
    pub northing: f64,
}

impl GridPoint {
    #[must_use]
    pub const fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Planar distance in km to another grid point.
    ///
    /// Only meaningful for nearby points on the same grid; use
    /// [`GreatCircle::distance`] for anything else.
    #[must_use]
    pub fn distance_km(&self, other: &GridPoint) -> f64 {
        let de = (self.easting - other.easting) / 1000.0;
        let dn = (self.northing - other.northing) / 1000.0;
        de.hypot(dn)
    }
}

/// Unit of a great-circle distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Mean Earth radius in this unit, as used by `haversine`
    #[must_use]
    pub const fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 6371.0,
            DistanceUnit::Miles => 3958.8,
        }
    }
}

impl From<DistanceUnit> for haversine::Units {
    fn from(unit: DistanceUnit) -> Self {
        match unit {
            DistanceUnit::Kilometers => haversine::Units::Kilometers,
            DistanceUnit::Miles => haversine::Units::Miles,
        }
    }
}

/// The eight compass octants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const OCTANTS: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    /// Short form, e.g. `NE`
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }

    /// Long form, e.g. `North East`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CompassPoint::N => "North",
            CompassPoint::NE => "North East",
            CompassPoint::E => "East",
            CompassPoint::SE => "South East",
            CompassPoint::S => "South",
            CompassPoint::SW => "South West",
            CompassPoint::W => "West",
            CompassPoint::NW => "North West",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Great-circle calculations
pub struct GreatCircle;

impl GreatCircle {
    /// Distance between two points, never negative
    #[must_use]
    pub fn distance(from: GeoPoint, to: GeoPoint, unit: DistanceUnit) -> f64 {
        if from == to {
            return 0.0;
        }
        let distance = haversine::distance(from.to_haversine(), to.to_haversine(), unit.into());
        // Rounding can push the haversine term past 1 for antipodal points
        if distance.is_nan() && from.is_finite() && to.is_finite() {
            return std::f64::consts::PI * unit.earth_radius();
        }
        distance
    }

    /// Initial bearing from `from` to `to` in `[0, 360)`.
    ///
    /// Identical points have no bearing; `0` is returned.
    #[must_use]
    pub fn direction(from: GeoPoint, to: GeoPoint) -> f64 {
        if from == to {
            return 0.0;
        }
        let lat1 = from.latitude.to_radians();
        let lat2 = to.latitude.to_radians();
        let delta_lon = (to.longitude - from.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

        normalize_degrees(y.atan2(x).to_degrees())
    }

    /// Compass octant of a bearing, with 45° buckets centred on each point
    #[must_use]
    pub fn direction_abbreviation(angle: f64) -> CompassPoint {
        let angle = normalize_degrees(angle);
        // Shift by half a bucket so N covers [337.5, 360) and [0, 22.5)
        let index = ((angle + 22.5) / 45.0).floor() as usize % 8;
        CompassPoint::OCTANTS[index]
    }
}

/// Fold any finite angle into `[0, 360)`
fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360
    if normalized >= 360.0 { 0.0 } else { normalized }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BRISTOL: GeoPoint = GeoPoint::new(51.4545, -2.5879);
    const LONDON: GeoPoint = GeoPoint::new(51.5074, -0.1278);
    const MANCHESTER: GeoPoint = GeoPoint::new(53.4808, -2.2426);

    #[test]
    fn test_identical_points_have_zero_distance() {
        assert_eq!(
            GreatCircle::distance(BRISTOL, BRISTOL, DistanceUnit::Kilometers),
            0.0
        );
        assert_eq!(GreatCircle::distance(BRISTOL, BRISTOL, DistanceUnit::Miles), 0.0);
        assert_eq!(GreatCircle::direction(BRISTOL, BRISTOL), 0.0);
    }

    #[test]
    fn test_london_to_manchester() {
        let km = GreatCircle::distance(LONDON, MANCHESTER, DistanceUnit::Kilometers);
        assert!((km - 262.0).abs() < 1.0, "got {km}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [BRISTOL, LONDON, MANCHESTER, GeoPoint::new(-33.87, 151.21)];
        for a in points {
            for b in points {
                let ab = GreatCircle::distance(a, b, DistanceUnit::Kilometers);
                let ba = GreatCircle::distance(b, a, DistanceUnit::Kilometers);
                assert!((ab - ba).abs() < 1e-9);
                assert!(ab >= 0.0);
            }
        }
    }

    #[test]
    fn test_antipodal_points_are_half_a_circumference_apart() {
        let from = GeoPoint::new(-78.126_399_406_430_4, -115.766_646_876_072_46);
        let to = GeoPoint::new(78.126_399_406_430_4, 64.233_353_123_927_54);

        let km = GreatCircle::distance(from, to, DistanceUnit::Kilometers);
        assert!((km - 20_015.09).abs() < 1.0, "got {km}");
        let miles = GreatCircle::distance(to, from, DistanceUnit::Miles);
        assert!((miles - 12_437.0).abs() < 1.0, "got {miles}");
    }

    #[test]
    fn test_miles_match_kilometres() {
        let km = GreatCircle::distance(LONDON, MANCHESTER, DistanceUnit::Kilometers);
        let miles = GreatCircle::distance(LONDON, MANCHESTER, DistanceUnit::Miles);
        let expected = km * 0.621_371;
        assert!(((miles - expected) / expected).abs() < 1e-4);
    }

    #[rstest]
    #[case(GeoPoint::new(51.0, 0.0), GeoPoint::new(52.0, 0.0), 0.0)]
    #[case(GeoPoint::new(51.0, 0.0), GeoPoint::new(50.0, 0.0), 180.0)]
    #[case(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), 90.0)]
    #[case(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, -1.0), 270.0)]
    fn test_direction_cardinals(#[case] from: GeoPoint, #[case] to: GeoPoint, #[case] expected: f64) {
        let bearing = GreatCircle::direction(from, to);
        assert!((bearing - expected).abs() < 1e-6, "got {bearing}");
    }

    #[test]
    fn test_direction_london_to_manchester_is_north_west() {
        let bearing = GreatCircle::direction(LONDON, MANCHESTER);
        assert!((bearing - 327.7).abs() < 0.1, "got {bearing}");
        assert_eq!(GreatCircle::direction_abbreviation(bearing), CompassPoint::NW);
    }

    #[test]
    fn test_direction_is_in_range() {
        let points = [
            BRISTOL,
            LONDON,
            MANCHESTER,
            GeoPoint::new(0.0, 179.9),
            GeoPoint::new(0.0, -179.9),
            GeoPoint::new(-45.0, 0.0),
            GeoPoint::new(51.4545, -2.5879 - 1e-12),
        ];
        for a in points {
            for b in points {
                let bearing = GreatCircle::direction(a, b);
                assert!((0.0..360.0).contains(&bearing), "{a:?} -> {b:?}: {bearing}");
            }
        }
    }

    #[rstest]
    #[case(0.0, CompassPoint::N)]
    #[case(22.49, CompassPoint::N)]
    #[case(22.5, CompassPoint::NE)]
    #[case(67.5, CompassPoint::E)]
    #[case(135.0, CompassPoint::SE)]
    #[case(180.0, CompassPoint::S)]
    #[case(202.5, CompassPoint::SW)]
    #[case(270.0, CompassPoint::W)]
    #[case(315.0, CompassPoint::NW)]
    #[case(337.49, CompassPoint::NW)]
    #[case(337.5, CompassPoint::N)]
    #[case(359.99, CompassPoint::N)]
    #[case(-90.0, CompassPoint::W)]
    #[case(450.0, CompassPoint::E)]
    fn test_direction_abbreviation(#[case] angle: f64, #[case] expected: CompassPoint) {
        assert_eq!(GreatCircle::direction_abbreviation(angle), expected);
    }

    #[test]
    fn test_compass_names() {
        assert_eq!(CompassPoint::SW.name(), "South West");
        assert_eq!(CompassPoint::SW.to_string(), "SW");
    }

    #[test]
    fn test_grid_distance() {
        let a = GridPoint::new(358_000.0, 172_000.0);
        let b = GridPoint::new(361_000.0, 176_000.0);
        assert!((a.distance_km(&b) - 5.0).abs() < 1e-9);
        assert_eq!(a.distance_km(&a), 0.0);
    }
}
