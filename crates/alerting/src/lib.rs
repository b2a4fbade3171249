//! Alerting System
//!
//! Decides which hazards are near the device, fires at most one alert per
//! evaluation pass, and hands decided alerts to an output sink.

mod evaluator;
mod geo;
mod sink;
mod state;

pub use evaluator::{Alert, AlertConfig, Evaluation, ProximityEvaluator};
pub use geo::{distance_between, distance_km, EARTH_RADIUS_KM};
pub use sink::{AlertSink, ChannelSink, NullSink, TracingSink};
pub use state::AlertState;
