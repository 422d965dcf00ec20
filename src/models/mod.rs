//! Data models for the walk programme
//!
//! This module contains the walk domain models organized by concern:
//! - Location: meeting, start and finish points of a walk
//! - Walk: the walk record handed over by the data-loading layer

pub mod location;
pub mod walk;

// Re-export all public types for convenient access
pub use location::{LocationKind, NO_TIME, WalkLocation, format_duration};
pub use walk::{WalkRecord, WalkStatus};
