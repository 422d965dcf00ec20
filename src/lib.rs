//! Walk programme - ordering and geometry for walking-club sites
//!
//! This library provides the logic behind a walk programme page: stable
//! multi-key ordering of walk records, great-circle distances and bearings,
//! and the postcode proximity checks shown next to meeting points.

pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod models;
pub mod postcode;
pub mod sort;
pub mod walks;

// Re-export core types for public API
pub use config::WalksConfig;
pub use error::WalksError;
pub use geometry::{CompassPoint, DistanceUnit, GeoPoint, GreatCircle, GridPoint};
pub use models::{LocationKind, WalkLocation, WalkRecord, WalkStatus};
pub use postcode::{PostcodeProximity, ProximityClass, ProximityThresholds};
pub use sort::{SortCriterion, WalkSorter};
pub use walks::{MonthSection, Walks};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WalksError>;
