//! Proximity Evaluator
//!
//! Runs one pass over a hazard snapshot for the device's last known position:
//! projects every hazard onto a marker and decides whether a single alert
//! should fire.

use crate::geo::distance_between;
use crate::state::AlertState;
use chrono::{DateTime, Utc};
use hazard_feed::{project_all, GeoPoint, HazardId, HazardRecord, HazardSnapshot, Marker};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Alert radius around the device in kilometres (default: 0.5)
    pub radius_km: f64,
    /// Text spoken before the hazard's address
    pub message_prefix: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            radius_km: 0.5,
            message_prefix: "Pothole detected ahead near".to_string(),
        }
    }
}

/// A decided alert, ready for an output sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub hazard_id: HazardId,
    pub address: String,
    pub distance_km: f64,
    /// Text to speak or display
    pub text: String,
    pub issued_at: DateTime<Utc>,
}

/// Result of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Markers for every hazard in the snapshot, in snapshot order
    pub markers: Vec<Marker>,
    /// At most one alert per pass
    pub alert: Option<Alert>,
}

/// Geofencing over hazard snapshots
pub struct ProximityEvaluator {
    config: AlertConfig,
}

impl ProximityEvaluator {
    /// Create a new evaluator
    pub fn new(config: AlertConfig) -> Self {
        info!("Creating proximity evaluator with config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Evaluate a snapshot against the device position, updating `state`
    /// when an alert fires.
    pub fn evaluate(
        &self,
        position: Option<GeoPoint>,
        snapshot: &HazardSnapshot,
        state: &mut AlertState,
    ) -> Evaluation {
        let markers = project_all(snapshot);

        let Some(position) = position else {
            debug!("No position fix yet, rendering {} markers only", markers.len());
            return Evaluation {
                markers,
                alert: None,
            };
        };

        if state.has_alerted() {
            debug!("Alert suppressed: already alerted this session");
            return Evaluation {
                markers,
                alert: None,
            };
        }

        let alert = self
            .first_eligible(&position, snapshot, state)
            .map(|(record, distance_km)| {
                state.record_alert(&record.id, &record.address);
                let alert = self.build_alert(record, distance_km);
                info!(
                    hazard = %alert.hazard_id,
                    distance_km = alert.distance_km,
                    "{}",
                    alert.text
                );
                alert
            });

        Evaluation { markers, alert }
    }

    /// First record in snapshot order that is in range, has an address to
    /// speak, and is not a repeat of the last spoken address
    fn first_eligible<'a>(
        &self,
        position: &GeoPoint,
        snapshot: &'a HazardSnapshot,
        state: &AlertState,
    ) -> Option<(&'a HazardRecord, f64)> {
        snapshot.iter().find_map(|record| {
            let distance_km = distance_between(position, &record.location);
            let in_range = distance_km <= self.config.radius_km;
            if !in_range {
                return None;
            }
            if record.address.trim().is_empty() {
                debug!("Hazard {} in range but has no address to announce", record.id);
                return None;
            }
            if state.is_repeat(&record.address) {
                debug!(
                    "Hazard {} in range but {} was already announced",
                    record.id, record.address
                );
                return None;
            }
            Some((record, distance_km))
        })
    }

    fn build_alert(&self, record: &HazardRecord, distance_km: f64) -> Alert {
        Alert {
            hazard_id: record.id.clone(),
            address: record.address.clone(),
            distance_km,
            text: format!("{} {}", self.config.message_prefix, record.address),
            issued_at: Utc::now(),
        }
    }
}

impl Default for ProximityEvaluator {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
