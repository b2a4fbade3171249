//! Session state machine

use crate::event::SessionEvent;
use alerting::{AlertConfig, AlertSink, AlertState, Evaluation, ProximityEvaluator};
use hazard_feed::{GeoPoint, HazardSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Re-run the evaluation on every position fix, not only on feed updates
    pub evaluate_on_position: bool,
    /// Inbound event queue depth
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            evaluate_on_position: true,
            channel_capacity: 64,
        }
    }
}

/// One screen session: owns the alert state and the latest inputs
pub struct Session {
    evaluator: ProximityEvaluator,
    pub(crate) config: SessionConfig,
    pub(crate) state: AlertState,
    /// Last good snapshot
    snapshot: Option<HazardSnapshot>,
    /// Last known position, kept indefinitely
    position: Option<GeoPoint>,
    sink: Box<dyn AlertSink>,
}

impl Session {
    /// Create a new session
    pub fn new(alert: AlertConfig, config: SessionConfig, sink: Box<dyn AlertSink>) -> Self {
        Self {
            evaluator: ProximityEvaluator::new(alert),
            config,
            state: AlertState::new(),
            snapshot: None,
            position: None,
            sink,
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    pub fn snapshot(&self) -> Option<&HazardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Apply one event. Returns the evaluation when the event triggered one.
    pub fn handle(&mut self, event: SessionEvent) -> Option<Evaluation> {
        match event {
            SessionEvent::Snapshot(snapshot) => {
                debug!("Hazard snapshot with {} records", snapshot.len());
                self.snapshot = Some(snapshot);
                Some(self.evaluate())
            }
            SessionEvent::FeedError(reason) => {
                warn!("Hazard feed unavailable, keeping last snapshot: {}", reason);
                None
            }
            SessionEvent::Position(position) => {
                self.position = Some(position);
                self.config.evaluate_on_position.then(|| self.evaluate())
            }
            SessionEvent::Resume => {
                info!("Session resumed");
                self.state.resume();
                None
            }
            SessionEvent::Pause => {
                info!("Session paused");
                self.sink.silence();
                None
            }
            SessionEvent::Shutdown => None,
        }
    }

    /// Evaluate the last snapshot at the last known position and dispatch
    /// the alert, if any
    pub fn evaluate(&mut self) -> Evaluation {
        let Some(snapshot) = &self.snapshot else {
            return Evaluation::default();
        };

        let evaluation = self
            .evaluator
            .evaluate(self.position, snapshot, &mut self.state);
        if let Some(alert) = &evaluation.alert {
            self.sink.dispatch(alert);
        }
        evaluation
    }
}
