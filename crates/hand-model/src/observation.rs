//! Per-hand observations, gesture events, and collected records.

use std::fmt;

use handsign_common::clock::TimestampSecs;
use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkFrame;

/// Identifier of a gesture, e.g. `"four-finger-gesture"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureLabel(String);

impl GestureLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GestureLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One detected hand in one processed video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    /// Position of the hand within the detector's output for this frame.
    pub hand_index: usize,
    pub landmarks: LandmarkFrame,
    pub timestamp: TimestampSecs,
}

impl HandObservation {
    pub fn new(hand_index: usize, landmarks: LandmarkFrame, timestamp: TimestampSecs) -> Self {
        Self {
            hand_index,
            landmarks,
            timestamp,
        }
    }
}

/// A debounced gesture announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub label: GestureLabel,
    pub hand_index: usize,
    pub timestamp: TimestampSecs,
}

/// Persisted form of a [`HandObservation`].
///
/// `gesture` is filled in by a labeling step after capture; the capture
/// path itself always writes records without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedRecord {
    pub hand_index: usize,
    pub landmarks: LandmarkFrame,
    pub timestamp: TimestampSecs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<String>,
}

impl CollectedRecord {
    /// Labeled copy of this record.
    pub fn annotate(&self, tag: impl Into<String>) -> Self {
        Self {
            gesture: Some(tag.into()),
            ..self.clone()
        }
    }

    /// Whether the annotation equals `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.gesture.as_deref() == Some(tag)
    }

    /// View this record as the observation it was captured from.
    pub fn observation(&self) -> HandObservation {
        HandObservation::new(self.hand_index, self.landmarks.clone(), self.timestamp)
    }
}

impl From<&HandObservation> for CollectedRecord {
    fn from(observation: &HandObservation) -> Self {
        Self {
            hand_index: observation.hand_index,
            landmarks: observation.landmarks.clone(),
            timestamp: observation.timestamp,
            gesture: None,
        }
    }
}
