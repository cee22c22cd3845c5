//! Handsign Capture
//!
//! Connects a hand detector to gesture announcements and data collection.
//! The detector and the event sink are external collaborators reached
//! through traits:
//!
//! - **Detector:** Yields the landmark frames of every hand in a video frame
//! - **Sink:** Receives debounced gesture events (display, speech, logs)
//!
//! Collection sessions buffer observations in memory and persist the whole
//! buffer to a JSON store on demand.

pub mod pipeline;
pub mod replay;
pub mod session;
pub mod stream;

use handsign_common::error::HandsignResult;
use handsign_hand_model::landmark::LandmarkFrame;
use handsign_hand_model::observation::GestureEvent;

pub use pipeline::{GesturePipeline, PipelineStats};
pub use replay::ReplayDetector;
pub use session::CollectionSession;
pub use stream::JsonLinesDetector;

/// One hand reported by a detector for one video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    pub hand_index: usize,
    pub landmarks: LandmarkFrame,
}

impl DetectedHand {
    pub fn new(hand_index: usize, landmarks: LandmarkFrame) -> Self {
        Self {
            hand_index,
            landmarks,
        }
    }

    /// Number hands by their position in the detector's output.
    pub fn enumerate(frames: impl IntoIterator<Item = LandmarkFrame>) -> Vec<Self> {
        frames
            .into_iter()
            .enumerate()
            .map(|(hand_index, landmarks)| Self::new(hand_index, landmarks))
            .collect()
    }
}

/// Trait for hand landmark detectors.
pub trait HandDetector: Send {
    /// Poll for the next processed video frame.
    ///
    /// Returns every detected hand, an empty list when the frame had no
    /// hands, or `None` if no frame is ready yet.
    fn detect(&mut self) -> HandsignResult<Option<Vec<DetectedHand>>>;

    /// Detector name for logging.
    fn name(&self) -> &str;

    /// Whether the detector will never produce another frame.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Consumer of announced gestures.
pub trait GestureSink: Send {
    fn on_gesture(&mut self, event: &GestureEvent);
}

/// Sink that only logs.
#[derive(Debug, Default)]
pub struct LogSink;

impl GestureSink for LogSink {
    fn on_gesture(&mut self, event: &GestureEvent) {
        tracing::info!(
            label = %event.label,
            hand_index = event.hand_index,
            timestamp = event.timestamp,
            "Gesture"
        );
    }
}

impl GestureSink for Vec<GestureEvent> {
    fn on_gesture(&mut self, event: &GestureEvent) {
        self.push(event.clone());
    }
}
