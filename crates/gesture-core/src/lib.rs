//! Handsign Gesture Core
//!
//! Turns landmark frames into gesture announcements:
//! - **Features:** Bounding spans and fold checks over landmark subsets
//! - **Classifier:** Ordered rule table, first match wins
//! - **Debounce:** Time-gated conversion of per-frame labels into events
//!
//! This crate is pure computation with no I/O.
//! Time enters only through the injected clock.

pub mod classifier;
pub mod debounce;
pub mod features;

pub use classifier::{GestureClassifier, GestureRule};
pub use debounce::{ChannelState, Debouncer};
pub use features::{are_others_folded, is_vertical_line, vertical_span, Span};
