//! Event log replay
//!
//! One JSON object per line, tagged by `"event"`:
//!
//! ```text
//! {"event":"snapshot","tree":{"-Nabc":{"latitude":-26.2,"longitude":28.0,"address":"Main Rd"}}}
//! {"event":"snapshot","entries":[{"id":"h1","latitude":0.0,"longitude":0.001,"address":"A"}]}
//! {"event":"position","latitude":-26.2,"longitude":28.0}
//! {"event":"feed_error","message":"permission denied"}
//! {"event":"resume"}
//! {"event":"pause"}
//! ```

use anyhow::Context;
use hazard_feed::{FeedEntry, FeedError, FeedUpdate, GeoPoint, HazardSnapshot};
use serde::Deserialize;
use serde_json::Value;
use session::{SessionEvent, SessionHandle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// One line of the replay log
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Feed update, either as the store's JSON tree or as an entry list
    Snapshot {
        #[serde(default)]
        tree: Option<Value>,
        #[serde(default)]
        entries: Vec<FeedEntry>,
    },
    Position {
        latitude: f64,
        longitude: f64,
    },
    FeedError {
        message: String,
    },
    Resume,
    Pause,
}

impl ReplayEvent {
    /// Convert into a session event, ingesting snapshots on the way
    pub fn into_session_event(self) -> Result<SessionEvent, FeedError> {
        let event = match self {
            ReplayEvent::Snapshot { tree, entries } => {
                let update = match tree {
                    Some(tree) => {
                        if !entries.is_empty() {
                            warn!(
                                "Snapshot has both tree and entries, ignoring {} entries",
                                entries.len()
                            );
                        }
                        FeedUpdate::from_tree(&tree)?
                    }
                    None => FeedUpdate::new(entries),
                };
                SessionEvent::Snapshot(HazardSnapshot::ingest(&update))
            }
            ReplayEvent::Position {
                latitude,
                longitude,
            } => SessionEvent::Position(GeoPoint::new(latitude, longitude)?),
            ReplayEvent::FeedError { message } => SessionEvent::FeedError(message),
            ReplayEvent::Resume => SessionEvent::Resume,
            ReplayEvent::Pause => SessionEvent::Pause,
        };
        Ok(event)
    }
}

/// Replay counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Events handed to the session
    pub applied: usize,
    /// Lines that could not be used
    pub skipped: usize,
}

/// Feed every line of `reader` into the session. Bad lines are logged and
/// skipped; a closed session or an I/O failure stops the replay.
pub async fn replay<R>(reader: R, handle: &SessionHandle) -> anyhow::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read event log")? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = match serde_json::from_str::<ReplayEvent>(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping line {}: {}", line_no, e);
                stats.skipped += 1;
                continue;
            }
        };
        debug!("Line {}: {:?}", line_no, event);

        match event.into_session_event() {
            Ok(event) => {
                handle
                    .send(event)
                    .await
                    .with_context(|| format!("Session closed at line {line_no}"))?;
                stats.applied += 1;
            }
            Err(e) => {
                warn!("Skipping line {}: {}", line_no, e);
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertConfig, ChannelSink};
    use hazard_feed::ColorClass;
    use session::{Session, SessionConfig};

    const LOG: &str = r#"
# device starts without a fix
{"event":"snapshot","tree":{"-Nb":{"latitude":0.0,"longitude":0.001,"address":"Main Rd","status":"unfixed"},"-Na":{"latitude":0.0,"longitude":0.05,"address":"Far Rd","status":"Fixed"},"-Nc":{"latitude":"unknown","longitude":"unknown","address":"unknown"}}}
{"event":"position","latitude":0.0,"longitude":0.0}
{"event":"feed_error","message":"permission denied"}
{"event":"position","latitude":999.0,"longitude":0.0}
not json at all
{"event":"pause"}
{"event":"resume"}
{"event":"snapshot","entries":[{"id":"h9","latitude":0.0,"longitude":0.002,"address":"Side St"}]}
"#;

    #[test]
    fn test_parse_events() {
        let event: ReplayEvent = serde_json::from_str(r#"{"event":"resume"}"#).unwrap();
        assert_eq!(event, ReplayEvent::Resume);

        let event: ReplayEvent =
            serde_json::from_str(r#"{"event":"position","latitude":1.5,"longitude":-2.0}"#)
                .unwrap();
        assert_eq!(
            event,
            ReplayEvent::Position {
                latitude: 1.5,
                longitude: -2.0
            }
        );

        assert!(serde_json::from_str::<ReplayEvent>(r#"{"event":"teleport"}"#).is_err());
    }

    #[test]
    fn test_empty_snapshot_event() {
        let event: ReplayEvent = serde_json::from_str(r#"{"event":"snapshot"}"#).unwrap();
        match event.into_session_event().unwrap() {
            SessionEvent::Snapshot(snapshot) => assert!(snapshot.is_empty()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_tree_takes_precedence_over_entries() {
        let event: ReplayEvent = serde_json::from_str(
            r#"{"event":"snapshot",
                "tree":{"t1":{"latitude":0.0,"longitude":0.0,"address":"Tree Rd"}},
                "entries":[{"id":"e1","latitude":1.0,"longitude":1.0,"address":"Entry Rd"}]}"#,
        )
        .unwrap();
        match event.into_session_event().unwrap() {
            SessionEvent::Snapshot(snapshot) => {
                let ids: Vec<&str> = snapshot.iter().map(|r| r.id.as_str()).collect();
                assert_eq!(ids, vec!["t1"]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_invalid_tree_is_rejected() {
        let event: ReplayEvent =
            serde_json::from_str(r#"{"event":"snapshot","tree":[1,2,3]}"#).unwrap();
        assert!(matches!(
            event.into_session_event(),
            Err(FeedError::InvalidFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_replay_log() {
        let (sink, mut alerts) = ChannelSink::channel(8);
        let session = Session::new(
            AlertConfig::default(),
            SessionConfig::default(),
            Box::new(sink),
        );
        let (handle, task) = session.spawn();

        let stats = replay(LOG.as_bytes(), &handle).await.unwrap();
        assert_eq!(
            stats,
            ReplayStats {
                applied: 6,
                skipped: 2
            }
        );

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        let first = alerts.recv().await.unwrap();
        assert_eq!(first.text, "Pothole detected ahead near Main Rd");
        let second = alerts.recv().await.unwrap();
        assert_eq!(second.text, "Pothole detected ahead near Side St");
        assert!(alerts.try_recv().is_err());

        let markers = handle.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].hazard_id.as_str(), "h9");
        assert_eq!(markers[0].color, ColorClass::Red);
    }
}
