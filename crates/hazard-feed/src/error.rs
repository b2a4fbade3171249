//! Feed Error Types

use thiserror::Error;

/// Errors raised while turning feed data into hazard records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// Required field missing, null, or of the wrong type
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Coordinate is not finite or outside its valid range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Feed payload does not have the expected shape
    #[error("Invalid feed format: {0}")]
    InvalidFormat(String),
}
