//! Store → labeled dataset → split.

use std::path::Path;

use handsign_common::config::{validate_test_fraction, DatasetConfig};
use handsign_common::error::HandsignResult;
use handsign_hand_model::observation::CollectedRecord;
use handsign_hand_model::store::load_records;

use crate::features::{flatten, label, FeatureVector};
use crate::split::{split, DatasetSplit};

/// Flattened rows with their binary labels, in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x: Vec<FeatureVector>,
    pub y: Vec<u8>,
}

impl Dataset {
    pub fn from_records(records: &[CollectedRecord], positive_tag: &str) -> Self {
        Self {
            x: records.iter().map(flatten).collect(),
            y: records.iter().map(|r| label(r, positive_tag)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.y.iter().filter(|&&l| l == 1).count()
    }

    pub fn split(
        &self,
        test_fraction: f64,
        seed: u64,
    ) -> HandsignResult<DatasetSplit<FeatureVector>> {
        split(&self.x, &self.y, test_fraction, seed)
    }
}

/// Offline dataset preparation with fixed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBuilder {
    positive_tag: String,
    test_fraction: f64,
    seed: u64,
}

impl DatasetBuilder {
    pub fn new(
        positive_tag: impl Into<String>,
        test_fraction: f64,
        seed: u64,
    ) -> HandsignResult<Self> {
        validate_test_fraction(test_fraction)?;
        Ok(Self {
            positive_tag: positive_tag.into(),
            test_fraction,
            seed,
        })
    }

    pub fn from_config(config: &DatasetConfig) -> HandsignResult<Self> {
        Self::new(config.positive_tag.clone(), config.test_fraction, config.seed)
    }

    pub fn positive_tag(&self) -> &str {
        &self.positive_tag
    }

    /// Load every record of the store at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> HandsignResult<Vec<CollectedRecord>> {
        let path = path.as_ref();
        let records = load_records(path)?;
        tracing::info!(path = %path.display(), records = records.len(), "Store loaded");
        Ok(records)
    }

    pub fn dataset(&self, records: &[CollectedRecord]) -> Dataset {
        Dataset::from_records(records, &self.positive_tag)
    }

    /// Load, flatten, label and split.
    pub fn build(&self, path: impl AsRef<Path>) -> HandsignResult<DatasetSplit<FeatureVector>> {
        let records = self.load(path)?;
        let dataset = self.dataset(&records);
        let split = dataset.split(self.test_fraction, self.seed)?;
        tracing::info!(
            positive_tag = %self.positive_tag,
            positives = dataset.positives(),
            summary = %split.summary(),
            "Dataset prepared"
        );
        Ok(split)
    }
}
