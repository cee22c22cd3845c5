//! Geometric features over landmark subsets.
//!
//! Coordinates follow image convention: y grows downward, so a larger y
//! means lower on screen.

use handsign_common::config::validate_indices;
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::landmark::{LandmarkFrame, LANDMARK_COUNT};

/// Axis-aligned extent of a landmark subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// `max(x) - min(x)`.
    pub width: f64,
    /// `max(y) - min(y)`.
    pub height: f64,
}

/// Width and height of the bounding box around `indices`.
pub fn vertical_span(frame: &LandmarkFrame, indices: &[usize]) -> HandsignResult<Span> {
    validate_indices(indices)?;
    Ok(span_of(frame, indices))
}

/// Whether the points at `indices` are stacked in a narrow, tall column:
/// `width < x_tolerance && height > y_min_range`.
pub fn is_vertical_line(
    frame: &LandmarkFrame,
    indices: &[usize],
    x_tolerance: f64,
    y_min_range: f64,
) -> HandsignResult<bool> {
    validate_indices(indices)?;
    Ok(line_of(frame, indices, x_tolerance, y_min_range))
}

/// Whether every landmark not listed in `except` sits at or below
/// `fold_threshold` (`y >= fold_threshold`).
///
/// Fails as soon as any non-excepted landmark has `y < fold_threshold`,
/// i.e. is still raised.
pub fn are_others_folded(
    frame: &LandmarkFrame,
    except: &[usize],
    fold_threshold: f64,
) -> HandsignResult<bool> {
    if let Some(&index) = except.iter().find(|&&i| i >= LANDMARK_COUNT) {
        return Err(HandsignError::InvalidIndex { index });
    }
    Ok(folded_except(frame, except, fold_threshold))
}

/// Span over indices already known to be valid and non-empty.
pub(crate) fn span_of(frame: &LandmarkFrame, indices: &[usize]) -> Span {
    let points = frame.landmarks();
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &i in indices {
        let p = &points[i];
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    Span {
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

pub(crate) fn line_of(
    frame: &LandmarkFrame,
    indices: &[usize],
    x_tolerance: f64,
    y_min_range: f64,
) -> bool {
    let span = span_of(frame, indices);
    span.width < x_tolerance && span.height > y_min_range
}

pub(crate) fn folded_except(frame: &LandmarkFrame, except: &[usize], fold_threshold: f64) -> bool {
    frame
        .iter()
        .enumerate()
        .filter(|(i, _)| !except.contains(i))
        .all(|(_, p)| !(p.y < fold_threshold))
}
