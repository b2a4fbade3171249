//! Hazard Monitor - Main Entry Point
//!
//! Usage: `hazard-monitor [EVENTS.jsonl|-] [CONFIG]`
//!
//! Replays the event log (stdin when omitted or `-`) through an alert session
//! and prints the final marker set as JSON.

use alerting::TracingSink;
use anyhow::Context;
use monitor::{init_logging, replay, Settings};
use session::Session;
use std::path::Path;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let events = args.next();
    let config = args.next();

    let settings = Settings::load(config.as_deref().map(Path::new))?;
    init_logging(&settings.logging)?;

    info!("=== Hazard Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let session = Session::new(settings.alert, settings.session, Box::new(TracingSink));
    let (handle, task) = session.spawn();

    let stats = match events.as_deref() {
        None | Some("-") => replay(BufReader::new(tokio::io::stdin()), &handle).await?,
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open event log {path}"))?;
            replay(BufReader::new(file), &handle).await?
        }
    };

    handle.shutdown().await?;
    let state = task.await.context("Session task failed")?;
    info!(
        applied = stats.applied,
        skipped = stats.skipped,
        alerted = state.has_alerted(),
        "Replay finished"
    );

    let markers = handle.markers();
    println!("{}", serde_json::to_string_pretty(&markers)?);

    Ok(())
}
