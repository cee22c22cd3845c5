//! Handsign Hand Model
//!
//! Defines the core data contracts shared by every stage:
//! - **Landmarks:** 21-point hand skeleton frames with fixed index semantics
//! - **Observations:** Per-hand detections, gesture events, collected records
//! - **Store:** The persisted JSON record format read back by dataset building
//!
//! x/y coordinates are normalized to `[0.0, 1.0]` relative to the image,
//! with y growing downward; z is unit-less relative depth.

pub mod landmark;
pub mod observation;
pub mod store;

pub use landmark::*;
pub use observation::*;
pub use store::*;
