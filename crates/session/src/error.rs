//! Session Error Types

use hazard_feed::FeedError;
use thiserror::Error;

/// Session error types
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session has ended")]
    Closed,

    #[error("Invalid position fix: {0}")]
    InvalidPosition(#[from] FeedError),
}
