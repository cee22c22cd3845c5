//! Replay a recorded store through the gesture pipeline.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use handsign_capture::{CollectionSession, GesturePipeline, ReplayDetector};
use handsign_common::clock::ManualClock;
use handsign_common::config::AppConfig;

use super::{finish_run, PrintSink};

pub async fn run(
    config: &AppConfig,
    store: PathBuf,
    record: Option<PathBuf>,
) -> anyhow::Result<()> {
    let clock = Arc::new(ManualClock::default());
    let mut detector = ReplayDetector::open(&store, clock.clone())
        .map_err(|e| anyhow::anyhow!("Failed to open store: {e}"))?;

    println!("Replaying {} record(s) from: {}", detector.remaining(), store.display());
    println!(
        "  Debounce: {}s ({:?})",
        config.debounce.interval_secs, config.debounce.scope
    );
    println!();

    let session = Arc::new(CollectionSession::new());
    if record.is_some() {
        session.toggle();
    }
    let mut pipeline = GesturePipeline::from_config(config, session.clone(), clock)?;

    let stop = pipeline.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::SeqCst);
        }
    });

    let stats = pipeline.run(&mut detector, &mut PrintSink).await?;
    finish_run(stats, &session, record.as_deref())
}
