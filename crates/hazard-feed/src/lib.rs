//! Hazard Feed
//!
//! Turns raw hazard-report feed updates into ordered snapshots and projects
//! hazard records onto map markers.

mod error;
mod marker;
mod record;
mod snapshot;

pub use error::FeedError;
pub use marker::{project, project_all, ColorClass, Marker};
pub use record::{GeoPoint, HazardId, HazardRecord, HazardStatus};
pub use snapshot::{FeedEntry, FeedUpdate, HazardSnapshot};
