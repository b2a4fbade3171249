//! Hazard Alert Session
//!
//! Merges the independent event sources of one screen session into a single
//! serialized stream:
//! - hazard feed snapshots (and feed errors)
//! - device position fixes
//! - screen lifecycle (resume / pause)
//!
//! Each event is fully evaluated before the next one is taken, so the alert
//! state only ever has a single writer.

mod actor;
mod error;
mod event;
mod session;

pub use actor::SessionHandle;
pub use error::SessionError;
pub use event::SessionEvent;
pub use session::{Session, SessionConfig};
