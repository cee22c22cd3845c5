//! Hand skeleton landmarks.
//!
//! A detector reports 21 keypoints per hand in a fixed order: the wrist,
//! then four points per finger from the palm outward. The last point of
//! each finger group is its tip.

use std::ops::RangeInclusive;

use handsign_common::error::{HandsignError, HandsignResult};
use serde::{Deserialize, Serialize};

/// Number of landmarks in one hand frame.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Tip landmark of every finger, thumb first.
pub const FINGERTIPS: [usize; 5] = [
    THUMB_TIP,
    INDEX_FINGER_TIP,
    MIDDLE_FINGER_TIP,
    RING_FINGER_TIP,
    PINKY_TIP,
];

/// Finger groups of the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Landmark indices belonging to this finger, palm outward.
    pub fn indices(self) -> RangeInclusive<usize> {
        let first = 1 + 4 * self.ordinal();
        first..=first + 3
    }

    /// Index of this finger's tip.
    pub fn tip(self) -> usize {
        *self.indices().end()
    }

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }

    fn ordinal(self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }
}

/// One keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate [0.0, 1.0], left to right.
    pub x: f64,
    /// Normalized Y coordinate [0.0, 1.0], top to bottom.
    pub y: f64,
    /// Relative depth.
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// All 21 landmarks of one hand at one detection instant.
///
/// Always exactly [`LANDMARK_COUNT`] points; deserializing a sequence of any
/// other length fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Build a frame from a detector's landmark list.
    pub fn new(points: Vec<Landmark>) -> HandsignResult<Self> {
        let len = points.len();
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| HandsignError::InvalidFrame { len })?;
        Ok(Self { points })
    }

    pub fn from_array(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Landmark at `index`, failing for indices outside the skeleton.
    pub fn get(&self, index: usize) -> HandsignResult<&Landmark> {
        self.points
            .get(index)
            .ok_or(HandsignError::InvalidIndex { index })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    /// The five fingertips, thumb first.
    pub fn fingertips(&self) -> [Landmark; 5] {
        FINGERTIPS.map(|i| self.points[i])
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkFrame {
    type Error = HandsignError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LandmarkFrame> for Vec<Landmark> {
    fn from(frame: LandmarkFrame) -> Self {
        frame.points.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_frame() -> LandmarkFrame {
        let points = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f64 / 100.0, i as f64 / 50.0, -(i as f64)))
            .collect();
        LandmarkFrame::new(points).unwrap()
    }

    #[test]
    fn test_finger_groups() {
        assert_eq!(Finger::Thumb.indices(), 1..=4);
        assert_eq!(Finger::Index.indices(), 5..=8);
        assert_eq!(Finger::Pinky.indices(), 17..=20);
        let tips: Vec<usize> = Finger::ALL.iter().map(|f| f.tip()).collect();
        assert_eq!(tips, FINGERTIPS.to_vec());
    }

    #[test]
    fn test_frame_rejects_wrong_length() {
        let err = LandmarkFrame::new(vec![Landmark::default(); 20]).unwrap_err();
        assert!(matches!(err, HandsignError::InvalidFrame { len: 20 }));
    }

    #[test]
    fn test_get_out_of_range() {
        let frame = ramp_frame();
        assert_eq!(frame.get(8).unwrap().x, 0.08);
        assert!(matches!(
            frame.get(21),
            Err(HandsignError::InvalidIndex { index: 21 })
        ));
    }

    #[test]
    fn test_fingertips() {
        let tips = ramp_frame().fingertips();
        assert_eq!(tips[0].z, -4.0);
        assert_eq!(tips[4].z, -20.0);
    }

    #[test]
    fn test_json_is_plain_landmark_list() {
        let frame = ramp_frame();
        let json = serde_json::to_value(&frame).unwrap();
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 21);
        assert_eq!(list[3]["x"], 0.03);

        let parsed: LandmarkFrame = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_json_with_wrong_length_fails() {
        let raw = r#"[{"x":0.1,"y":0.2,"z":0.0}]"#;
        assert!(serde_json::from_str::<LandmarkFrame>(raw).is_err());
    }
}
