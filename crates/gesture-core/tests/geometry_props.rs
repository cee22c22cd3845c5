use handsign_gesture_core::{is_vertical_line, vertical_span, GestureClassifier};
use handsign_hand_model::{GestureLabel, Landmark, LandmarkFrame, LANDMARK_COUNT};
use proptest::prelude::*;

const TIPS: [usize; 4] = [8, 12, 16, 20];

fn frame_from(points: &[(f64, f64)]) -> LandmarkFrame {
    let mut all = [Landmark::new(0.5, 0.95, 0.0); LANDMARK_COUNT];
    for (i, &(x, y)) in points.iter().enumerate() {
        all[i] = Landmark::new(x, y, 0.0);
    }
    LandmarkFrame::from_array(all)
}

fn shifted(frame: &LandmarkFrame, indices: &[usize], dx: &[f64]) -> LandmarkFrame {
    let mut points = *frame.landmarks();
    for (&i, &d) in indices.iter().zip(dx) {
        points[i].x += d;
    }
    LandmarkFrame::from_array(points)
}

fn points_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.2f64..0.8, 0.0f64..1.0), LANDMARK_COUNT)
}

proptest! {
    #[test]
    fn vertical_line_is_invariant_under_uniform_horizontal_shift(
        points in points_strategy(),
        dx in -0.15f64..0.15,
    ) {
        let frame = frame_from(&points);
        let moved = shifted(&frame, &TIPS, &[dx; 4]);

        let before = vertical_span(&frame, &TIPS).unwrap();
        let after = vertical_span(&moved, &TIPS).unwrap();
        prop_assert!((before.width - after.width).abs() < 1e-9);
        prop_assert_eq!(before.height, after.height);

        // keep clear of the tolerance boundary where float rounding decides
        prop_assume!((before.width - 0.05).abs() > 1e-6);
        prop_assert_eq!(
            is_vertical_line(&frame, &TIPS, 0.05, 0.06).unwrap(),
            is_vertical_line(&moved, &TIPS, 0.05, 0.06).unwrap()
        );
    }

    #[test]
    fn spreading_one_tip_past_tolerance_breaks_the_line(
        ys in prop::collection::vec(0.0f64..1.0, 4),
        base_x in 0.2f64..0.6,
        spread in 0.051f64..0.3,
    ) {
        let mut points = vec![(0.5, 0.95); LANDMARK_COUNT];
        for (&i, &y) in TIPS.iter().zip(&ys) {
            points[i] = (base_x, y);
        }
        let frame = frame_from(&points);
        let moved = shifted(&frame, &TIPS, &[0.0, 0.0, 0.0, spread]);
        prop_assert!(vertical_span(&moved, &TIPS).unwrap().width > 0.05);
        prop_assert!(!is_vertical_line(&moved, &TIPS, 0.05, 0.06).unwrap());
    }
}

#[test]
fn reference_four_finger_frame() {
    let classifier = GestureClassifier::with_defaults().unwrap();
    let mut points = vec![(0.5, 0.95); LANDMARK_COUNT];
    for (&i, y) in TIPS.iter().zip([0.10, 0.30, 0.50, 0.70]) {
        points[i] = (0.50, y);
    }
    let frame = frame_from(&points);

    let span = vertical_span(&frame, &TIPS).unwrap();
    assert_eq!(span.width, 0.0);
    assert!((span.height - 0.6).abs() < 1e-12);
    assert_eq!(
        classifier.classify(&frame),
        Some(GestureLabel::from("four-finger-gesture"))
    );

    let moved = shifted(&frame, &TIPS, &[0.0, 0.0, 0.10, 0.0]);
    assert_ne!(
        classifier.classify(&moved),
        Some(GestureLabel::from("four-finger-gesture"))
    );
}
