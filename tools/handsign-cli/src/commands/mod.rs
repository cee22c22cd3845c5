pub mod capture;
pub mod config;
pub mod info;
pub mod label;
pub mod prepare;
pub mod replay;

use std::path::Path;

use handsign_capture::{CollectionSession, GestureSink, PipelineStats};
use handsign_hand_model::GestureEvent;

/// Prints each announcement as it happens.
pub struct PrintSink;

impl GestureSink for PrintSink {
    fn on_gesture(&mut self, event: &GestureEvent) {
        println!(
            "  {:>9.3}s  hand {}  {}",
            event.timestamp, event.hand_index, event.label
        );
    }
}

/// Print run totals and persist the session if recording was requested.
pub fn finish_run(
    stats: PipelineStats,
    session: &CollectionSession,
    record: Option<&Path>,
) -> anyhow::Result<()> {
    println!();
    println!(
        "{} frame(s), {} hand(s), {} event(s)",
        stats.frames, stats.hands, stats.events
    );

    if let Some(path) = record {
        let written = session.persist(path)?;
        println!("Recorded {written} observation(s) to: {}", path.display());
    }
    Ok(())
}
