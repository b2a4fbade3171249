//! Inbound session events

use hazard_feed::{GeoPoint, HazardSnapshot};

/// Everything a session reacts to
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Full replacement of the hazard set
    Snapshot(HazardSnapshot),

    /// Hazard feed reported a failure; the last good snapshot stays in use
    FeedError(String),

    /// New device position fix
    Position(GeoPoint),

    /// Screen became active
    Resume,

    /// Screen left the foreground
    Pause,

    /// End the session after the events already queued
    Shutdown,
}
