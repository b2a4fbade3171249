//! Session alert state

use hazard_feed::HazardId;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Suppression state for one screen session.
///
/// Once an alert fires, every further alert is held back until the session
/// resumes. The last spoken address survives resumes so the same place is
/// never announced twice in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    last_alerted_hazard: Option<HazardId>,
    last_spoken_address: Option<String>,
    has_alerted: bool,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an alert already fired during the current episode
    pub fn has_alerted(&self) -> bool {
        self.has_alerted
    }

    pub fn last_alerted_hazard(&self) -> Option<&HazardId> {
        self.last_alerted_hazard.as_ref()
    }

    pub fn last_spoken_address(&self) -> Option<&str> {
        self.last_spoken_address.as_deref()
    }

    /// Whether `address` is the one most recently announced
    pub fn is_repeat(&self, address: &str) -> bool {
        self.last_spoken_address.as_deref() == Some(address)
    }

    /// Record that an alert fired for a hazard
    pub fn record_alert(&mut self, hazard_id: &HazardId, address: &str) {
        self.last_alerted_hazard = Some(hazard_id.clone());
        self.last_spoken_address = Some(address.to_string());
        self.has_alerted = true;
    }

    /// Screen became active again: start a new episode
    pub fn resume(&mut self) {
        if self.has_alerted {
            info!("Alert suppression cleared on resume");
        }
        self.has_alerted = false;
    }
}
