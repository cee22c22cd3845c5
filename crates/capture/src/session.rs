//! Collection sessions.
//!
//! A session records hand observations while active. Toggling never drops
//! buffered records, and persisting never clears them: every persist writes
//! the whole buffer accumulated since the session was created.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use handsign_common::error::HandsignResult;
use handsign_hand_model::observation::{CollectedRecord, HandObservation};
use handsign_hand_model::store::save_records;

#[derive(Debug, Default)]
struct Buffer {
    active: bool,
    records: Vec<CollectedRecord>,
}

/// Toggleable recorder of hand observations.
///
/// Safe to share between the frame loop and whatever owns user input.
#[derive(Debug, Default)]
pub struct CollectionSession {
    buffer: Mutex<Buffer>,
}

impl CollectionSession {
    /// Create an inactive session with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip between recording and idle. Returns the new state.
    pub fn toggle(&self) -> bool {
        let mut buffer = self.lock();
        buffer.active = !buffer.active;
        tracing::info!(
            active = buffer.active,
            buffered = buffer.records.len(),
            "Collection {}",
            if buffer.active { "started" } else { "paused" }
        );
        buffer.active
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// Append `observation` if the session is active. Returns whether it
    /// was recorded.
    pub fn record(&self, observation: &HandObservation) -> bool {
        let mut buffer = self.lock();
        if !buffer.active {
            return false;
        }
        buffer.records.push(CollectedRecord::from(observation));
        true
    }

    /// Write the entire buffer to `path`, replacing its content.
    ///
    /// The buffer is left untouched whether or not the write succeeds.
    pub fn persist(&self, path: impl AsRef<Path>) -> HandsignResult<usize> {
        let path = path.as_ref();
        let buffer = self.lock();
        save_records(path, &buffer.records)?;
        tracing::info!(
            path = %path.display(),
            records = buffer.records.len(),
            "Collection persisted"
        );
        Ok(buffer.records.len())
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the buffered records.
    pub fn records(&self) -> Vec<CollectedRecord> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_common::error::HandsignError;
    use handsign_hand_model::landmark::{Landmark, LandmarkFrame, LANDMARK_COUNT};
    use handsign_hand_model::store::load_records;

    fn observation(hand_index: usize, timestamp: f64) -> HandObservation {
        let frame =
            LandmarkFrame::from_array([Landmark::new(0.5, timestamp / 10.0, 0.0); LANDMARK_COUNT]);
        HandObservation::new(hand_index, frame, timestamp)
    }

    #[test]
    fn test_record_is_noop_while_inactive() {
        let session = CollectionSession::new();
        assert!(!session.record(&observation(0, 0.0)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_toggle_keeps_buffer() {
        let session = CollectionSession::new();
        assert!(session.toggle());
        assert!(session.record(&observation(0, 0.1)));
        assert!(session.record(&observation(1, 0.1)));
        assert!(!session.toggle());
        assert!(!session.record(&observation(0, 0.2)));
        assert!(session.toggle());
        assert!(session.record(&observation(0, 0.3)));

        let records = session.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].hand_index, 1);
        assert_eq!(records[2].timestamp, 0.3);
    }

    #[test]
    fn test_persist_rewrites_whole_buffer() {
        let dir = std::env::temp_dir().join("handsign_test_session_persist");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("hand_data.json");

        let session = CollectionSession::new();
        session.toggle();
        session.record(&observation(0, 1.0));
        assert_eq!(session.persist(&path).unwrap(), 1);

        session.record(&observation(0, 2.0));
        session.record(&observation(1, 2.0));
        assert_eq!(session.persist(&path).unwrap(), 3);
        assert_eq!(session.len(), 3);

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, session.records());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_persist_keeps_buffer() {
        let dir = std::env::temp_dir().join("handsign_test_session_unwritable");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let session = CollectionSession::new();
        session.toggle();
        session.record(&observation(0, 1.0));
        session.record(&observation(0, 2.0));

        // a directory is never a writable file target
        match session.persist(&dir) {
            Err(HandsignError::Persist { records, .. }) => assert_eq!(records, 2),
            other => panic!("expected persist error, got {other:?}"),
        }
        assert_eq!(session.len(), 2);

        let retry = dir.join("hand_data.json");
        assert_eq!(session.persist(&retry).unwrap(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_concurrent_toggle_and_record() {
        use std::sync::Arc;

        let session = Arc::new(CollectionSession::new());
        session.toggle();

        let recorders: Vec<_> = (0..4)
            .map(|hand| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        session.record(&observation(hand, i as f64));
                    }
                })
            })
            .collect();
        for handle in recorders {
            handle.join().unwrap();
        }

        assert_eq!(session.len(), 400);
    }
}
