//! Record → feature vector and label.

use handsign_hand_model::landmark::LANDMARK_COUNT;
use handsign_hand_model::observation::CollectedRecord;

/// Length of a flattened hand: 21 landmarks × (x, y, z).
pub const FEATURE_LEN: usize = LANDMARK_COUNT * 3;

pub type FeatureVector = [f64; FEATURE_LEN];

/// Concatenate `(x, y, z)` of landmarks 0 through 20, in index order.
///
/// Downstream consumers depend on this exact layout.
pub fn flatten(record: &CollectedRecord) -> FeatureVector {
    let mut features = [0.0; FEATURE_LEN];
    for (chunk, p) in features.chunks_exact_mut(3).zip(record.landmarks.iter()) {
        chunk[0] = p.x;
        chunk[1] = p.y;
        chunk[2] = p.z;
    }
    features
}

/// 1 if the record's annotation equals `positive_tag`, else 0.
///
/// Unannotated records are negatives, never skipped.
pub fn label(record: &CollectedRecord, positive_tag: &str) -> u8 {
    u8::from(record.has_tag(positive_tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_hand_model::landmark::{Landmark, LandmarkFrame};

    fn record(gesture: Option<&str>) -> CollectedRecord {
        let points = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f64, 100.0 + i as f64, 200.0 + i as f64))
            .collect();
        CollectedRecord {
            hand_index: 0,
            landmarks: LandmarkFrame::new(points).unwrap(),
            timestamp: 0.0,
            gesture: gesture.map(str::to_string),
        }
    }

    #[test]
    fn test_flatten_layout() {
        let features = flatten(&record(None));
        assert_eq!(features.len(), 63);
        assert_eq!(&features[..6], &[0.0, 100.0, 200.0, 1.0, 101.0, 201.0]);
        assert_eq!(&features[60..], &[20.0, 120.0, 220.0]);
    }

    #[test]
    fn test_label_is_strict_equality() {
        let tag = "four-finger-gesture";
        assert_eq!(label(&record(None), tag), 0);
        assert_eq!(label(&record(Some("other")), tag), 0);
        assert_eq!(label(&record(Some("Four-Finger-Gesture")), tag), 0);
        assert_eq!(label(&record(Some("four-finger-gesture ")), tag), 0);
        assert_eq!(label(&record(Some(tag)), tag), 1);
    }
}
