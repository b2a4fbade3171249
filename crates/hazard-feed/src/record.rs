//! Hazard Records

use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a hazard report
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardId(String);

impl HazardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HazardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HazardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for HazardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FeedError> {
        check_coordinate("latitude", latitude, 90.0)?;
        check_coordinate("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<(), FeedError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(FeedError::InvalidCoordinate {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}

/// Repair status of a hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardStatus {
    #[default]
    Unresolved,
    Resolved,
}

impl HazardStatus {
    /// Feed token marking a hazard as repaired
    pub const RESOLVED_TOKEN: &'static str = "fixed";

    /// Map the feed's free-form status field. Only a case-insensitive
    /// `"fixed"` counts as resolved.
    pub fn from_feed(raw: Option<&str>) -> Self {
        match raw {
            Some(token) if token.eq_ignore_ascii_case(Self::RESOLVED_TOKEN) => Self::Resolved,
            _ => Self::Unresolved,
        }
    }

    pub fn is_resolved(self) -> bool {
        self == Self::Resolved
    }
}

/// One reported hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardRecord {
    pub id: HazardId,
    pub location: GeoPoint,
    /// Human-readable label, may be blank
    pub address: String,
    pub status: HazardStatus,
}
