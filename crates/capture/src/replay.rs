//! Replay of a persisted store as a detector.
//!
//! Consecutive records sharing a timestamp were captured from the same
//! video frame and are replayed together. Before yielding a frame the
//! replay moves the shared clock to that frame's timestamp, so the
//! debouncer sees recorded time rather than wall time. Each hand keeps
//! the `hand_index` it was recorded with.

use std::path::Path;
use std::sync::Arc;

use handsign_common::clock::ManualClock;
use handsign_common::error::HandsignResult;
use handsign_hand_model::observation::CollectedRecord;
use handsign_hand_model::store::load_records;

use crate::{DetectedHand, HandDetector};

pub struct ReplayDetector {
    records: Vec<CollectedRecord>,
    cursor: usize,
    clock: Arc<ManualClock>,
}

impl ReplayDetector {
    pub fn new(records: Vec<CollectedRecord>, clock: Arc<ManualClock>) -> Self {
        Self {
            records,
            cursor: 0,
            clock,
        }
    }

    /// Load a store from disk for replay.
    pub fn open(path: impl AsRef<Path>, clock: Arc<ManualClock>) -> HandsignResult<Self> {
        let records = load_records(path)?;
        Ok(Self::new(records, clock))
    }

    /// Records not yet replayed.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }
}

impl HandDetector for ReplayDetector {
    fn detect(&mut self) -> HandsignResult<Option<Vec<DetectedHand>>> {
        let Some(first) = self.records.get(self.cursor) else {
            return Ok(None);
        };
        let timestamp = first.timestamp;

        let frame_len = self.records[self.cursor..]
            .iter()
            .take_while(|r| r.timestamp == timestamp)
            .count();
        let hands = self.records[self.cursor..self.cursor + frame_len]
            .iter()
            .map(|r| DetectedHand::new(r.hand_index, r.landmarks.clone()))
            .collect();
        self.cursor += frame_len;

        self.clock.set(timestamp);
        Ok(Some(hands))
    }

    fn name(&self) -> &str {
        "replay"
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.records.len()
    }
}
