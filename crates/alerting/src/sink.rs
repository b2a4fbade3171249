//! Alert delivery
//!
//! Sinks are fire-and-forget: an unavailable output device turns a dispatch
//! into a no-op and nothing is ever reported back to the evaluator.

use crate::evaluator::Alert;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};

/// Output device for decided alerts (speech, on-screen notice, ...)
pub trait AlertSink: Send + Sync {
    /// Best-effort delivery of one alert
    fn dispatch(&self, alert: &Alert);

    /// Stop any output in progress
    fn silence(&self) {}
}

/// Delivers alerts as structured log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn dispatch(&self, alert: &Alert) {
        info!(
            target: "hazard_alert",
            hazard = %alert.hazard_id,
            address = %alert.address,
            distance_km = alert.distance_km,
            "{}",
            alert.text
        );
    }
}

/// Discards every alert
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AlertSink for NullSink {
    fn dispatch(&self, _alert: &Alert) {}
}

/// Forwards alerts to an output task over a bounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Alert>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Alert>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end for the output task
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Alert>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl AlertSink for ChannelSink {
    fn dispatch(&self, alert: &Alert) {
        // Never wait on the output device
        match self.tx.try_send(alert.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Alert output busy, dropping alert for {}", alert.hazard_id);
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Alert output unavailable, dropping alert for {}", alert.hazard_id);
            }
        }
    }
}
