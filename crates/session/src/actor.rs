//! Session event loop
//!
//! A single task owns the [`Session`]; every event source talks to it through
//! a cloneable [`SessionHandle`].

use crate::error::SessionError;
use crate::event::SessionEvent;
use crate::session::Session;
use alerting::AlertState;
use hazard_feed::{GeoPoint, HazardSnapshot, Marker};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sending side of a running session
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionEvent>,
    markers: watch::Receiver<Vec<Marker>>,
}

impl Session {
    /// Move the session onto its own task.
    ///
    /// The loop ends when every handle is dropped or a shutdown event is
    /// taken; the join handle yields the final alert state.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<AlertState>) {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let (markers_tx, markers_rx) = watch::channel(Vec::new());

        let task = tokio::spawn(self.run(rx, markers_tx));
        let handle = SessionHandle {
            tx,
            markers: markers_rx,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut rx: mpsc::Receiver<SessionEvent>,
        markers_tx: watch::Sender<Vec<Marker>>,
    ) -> AlertState {
        info!("Hazard session started");

        while let Some(event) = rx.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                debug!("Shutdown requested");
                break;
            }
            if let Some(evaluation) = self.handle(event) {
                // Replace the rendered set wholesale
                markers_tx.send_replace(evaluation.markers);
            }
        }

        info!("Hazard session ended");
        self.state
    }
}

impl SessionHandle {
    /// Queue an event, waiting for room when the queue is full
    pub async fn send(&self, event: SessionEvent) -> Result<(), SessionError> {
        self.tx.send(event).await.map_err(|_| SessionError::Closed)
    }

    pub async fn publish_snapshot(&self, snapshot: HazardSnapshot) -> Result<(), SessionError> {
        self.send(SessionEvent::Snapshot(snapshot)).await
    }

    pub async fn feed_error(&self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.send(SessionEvent::FeedError(reason.into())).await
    }

    /// Queue a position fix; invalid coordinates are logged and rejected
    /// here and never reach the session
    pub async fn update_position(&self, latitude: f64, longitude: f64) -> Result<(), SessionError> {
        let position = GeoPoint::new(latitude, longitude).map_err(|e| {
            warn!("Ignoring position fix ({}, {}): {}", latitude, longitude, e);
            e
        })?;
        self.send(SessionEvent::Position(position)).await
    }

    pub async fn resume(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::Resume).await
    }

    pub async fn pause(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::Pause).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::Shutdown).await
    }

    /// Latest published marker set
    pub fn markers(&self) -> Vec<Marker> {
        self.markers.borrow().clone()
    }

    /// Watch the marker set for changes
    pub fn subscribe_markers(&self) -> watch::Receiver<Vec<Marker>> {
        self.markers.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
