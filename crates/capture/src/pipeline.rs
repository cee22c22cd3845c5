//! The per-frame gesture pipeline.
//!
//! For each processed video frame: stamp every detected hand with the
//! clock, hand it to the collection session, classify it, and let the
//! debouncer decide whether it becomes an event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handsign_common::clock::{Clock, ReportThrottle};
use handsign_common::config::AppConfig;
use handsign_common::error::HandsignResult;
use handsign_gesture_core::{Debouncer, GestureClassifier};
use handsign_hand_model::landmark::{Finger, LandmarkFrame};
use handsign_hand_model::observation::{GestureEvent, HandObservation};

use crate::session::CollectionSession;
use crate::{DetectedHand, GestureSink, HandDetector};

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames: u64,
    pub hands: u64,
    pub events: u64,
}

pub struct GesturePipeline {
    classifier: GestureClassifier,
    debouncer: Debouncer,
    session: Arc<CollectionSession>,
    clock: Arc<dyn Clock>,
    report: ReportThrottle,
    stop_flag: Arc<AtomicBool>,
    stats: PipelineStats,
}

impl GesturePipeline {
    pub fn new(
        classifier: GestureClassifier,
        debouncer: Debouncer,
        session: Arc<CollectionSession>,
        clock: Arc<dyn Clock>,
        report_interval_secs: f64,
    ) -> Self {
        let report = ReportThrottle::new(report_interval_secs, clock.now_secs());
        Self {
            classifier,
            debouncer,
            session,
            clock,
            report,
            stop_flag: Arc::new(AtomicBool::new(false)),
            stats: PipelineStats::default(),
        }
    }

    /// Build every stage from configuration. Misconfigured rules abort here.
    pub fn from_config(
        config: &AppConfig,
        session: Arc<CollectionSession>,
        clock: Arc<dyn Clock>,
    ) -> HandsignResult<Self> {
        config.validate()?;
        let classifier = GestureClassifier::from_config(&config.classifier)?;
        let debouncer = Debouncer::new(&config.debounce, clock.clone());
        Ok(Self::new(
            classifier,
            debouncer,
            session,
            clock,
            config.capture.report_interval_secs,
        ))
    }

    /// Process one video frame whose hands are numbered by position.
    pub fn process_frame(&mut self, frames: &[LandmarkFrame]) -> Vec<GestureEvent> {
        self.process_hands(&DetectedHand::enumerate(frames.iter().cloned()))
    }

    /// Process the hands of one video frame and return announced gestures.
    pub fn process_hands(&mut self, hands: &[DetectedHand]) -> Vec<GestureEvent> {
        let now = self.clock.now_secs();
        self.stats.frames += 1;
        self.stats.hands += hands.len() as u64;

        let mut events = vec![];
        for hand in hands {
            let observation = HandObservation::new(hand.hand_index, hand.landmarks.clone(), now);
            self.session.record(&observation);

            let label = self.classifier.classify(&hand.landmarks);
            if let Some(event) = self.debouncer.observe_at(label.as_ref(), hand.hand_index, now) {
                events.push(event);
            }
        }

        if !hands.is_empty() && self.report.should_fire(now) {
            report_fingertips(hands);
        }

        self.stats.events += events.len() as u64;
        events
    }

    /// Run until the stop flag is set or the detector runs dry.
    ///
    /// Detector failures from the environment are logged and retried after a
    /// short pause; any other error ends the run.
    pub async fn run(
        &mut self,
        detector: &mut dyn HandDetector,
        sink: &mut dyn GestureSink,
    ) -> HandsignResult<PipelineStats> {
        tracing::info!(detector = %detector.name(), "Gesture pipeline started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match detector.detect() {
                Ok(Some(hands)) => {
                    for event in self.process_hands(&hands) {
                        sink.on_gesture(&event);
                    }
                }
                Ok(None) if detector.is_finished() => break,
                Ok(None) => {
                    // No frame ready, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Err(e) if e.is_environmental() => {
                    tracing::warn!(error = %e, "Detector error");
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            frames = self.stats.frames,
            hands = self.stats.hands,
            events = self.stats.events,
            "Gesture pipeline stopped"
        );
        Ok(self.stats)
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn session(&self) -> &Arc<CollectionSession> {
        &self.session
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}

fn report_fingertips(hands: &[DetectedHand]) {
    for hand in hands {
        for (finger, tip) in Finger::ALL.iter().zip(hand.landmarks.fingertips()) {
            tracing::info!(
                hand_index = hand.hand_index,
                finger = finger.name(),
                x = tip.x,
                y = tip.y,
                z = tip.z,
                "Fingertip"
            );
        }
    }
}
