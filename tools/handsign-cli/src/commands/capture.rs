//! Live gesture recognition over frames streamed from a detector process.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use handsign_capture::{CollectionSession, GesturePipeline, JsonLinesDetector};
use handsign_common::clock::SystemClock;
use handsign_common::config::AppConfig;

use super::{finish_run, PrintSink};

pub async fn run(
    config: &AppConfig,
    input: Option<PathBuf>,
    record: Option<PathBuf>,
) -> anyhow::Result<()> {
    let reader: Box<dyn BufRead + Send> = match &input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let mut detector = JsonLinesDetector::new(reader);

    let clock = Arc::new(SystemClock::start());
    let source = input
        .as_ref()
        .map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    println!("Capturing frames from: {source}");
    println!("  Started: {}", clock.epoch_wall());
    if let Some(path) = &record {
        println!("  Recording to: {}", path.display());
    }
    println!("Press Ctrl+C to stop (takes effect on the next frame)...");
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
    println!("Read {} line(s)", detector.lines_read());
    finish_run(stats, &session, record.as_deref())
}
