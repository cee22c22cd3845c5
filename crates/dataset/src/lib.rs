//! Handsign Dataset
//!
//! Offline preparation of classifier training data from a record store:
//! load → flatten each record into 63 floats → binary label from the
//! annotation → seeded train/test split.

pub mod builder;
pub mod features;
pub mod split;

pub use builder::{Dataset, DatasetBuilder};
pub use features::{flatten, label, FeatureVector, FEATURE_LEN};
pub use split::{split, DatasetSplit, SplitSummary};
