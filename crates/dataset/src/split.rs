//! Seeded train/test partitioning.

use std::fmt;
use std::path::Path;

use handsign_common::config::validate_test_fraction;
use handsign_common::error::{HandsignError, HandsignResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// A train/test partition. Rows and labels stay paired, and
/// `*_indices` name the source row of every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<T> {
    pub x_train: Vec<T>,
    pub x_test: Vec<T>,
    pub y_train: Vec<u8>,
    pub y_test: Vec<u8>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Row and positive counts per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub train: usize,
    pub test: usize,
    pub train_positive: usize,
    pub test_positive: usize,
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train {} ({} positive), test {} ({} positive)",
            self.train, self.train_positive, self.test, self.test_positive
        )
    }
}

#[derive(Serialize)]
struct SplitFile<'a> {
    x: Vec<&'a [f64]>,
    y: &'a [u8],
}

/// Shuffle row indices with `seed` and hold out `ceil(n * test_fraction)`
/// rows for testing.
///
/// The same inputs always produce the same partition.
pub fn split<T: Clone>(
    x: &[T],
    y: &[u8],
    test_fraction: f64,
    seed: u64,
) -> HandsignResult<DatasetSplit<T>> {
    validate_test_fraction(test_fraction)?;
    if x.len() != y.len() {
        return Err(HandsignError::dataset(format!(
            "feature rows ({}) and labels ({}) differ in length",
            x.len(),
            y.len()
        )));
    }

    let n = x.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(HandsignError::dataset(format!(
            "cannot split {n} record(s) with test fraction {test_fraction}: \
             train and test must both be non-empty"
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test_indices, train_indices) = order.split_at(n_test);

    let pick_x = |idx: &[usize]| idx.iter().map(|&i| x[i].clone()).collect::<Vec<_>>();
    let pick_y = |idx: &[usize]| idx.iter().map(|&i| y[i]).collect::<Vec<_>>();

    Ok(DatasetSplit {
        x_train: pick_x(train_indices),
        x_test: pick_x(test_indices),
        y_train: pick_y(train_indices),
        y_test: pick_y(test_indices),
        train_indices: train_indices.to_vec(),
        test_indices: test_indices.to_vec(),
    })
}

impl<T> DatasetSplit<T> {
    pub fn summary(&self) -> SplitSummary {
        let positives = |y: &[u8]| y.iter().filter(|&&l| l == 1).count();
        SplitSummary {
            train: self.y_train.len(),
            test: self.y_test.len(),
            train_positive: positives(&self.y_train),
            test_positive: positives(&self.y_test),
        }
    }
}

impl<T: AsRef<[f64]>> DatasetSplit<T> {
    /// Write `train.json` and `test.json` (`{"x": [[..]], "y": [..]}`) into `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> HandsignResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| HandsignError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        for (name, x, y) in [
            ("train.json", &self.x_train, &self.y_train),
            ("test.json", &self.x_test, &self.y_test),
        ] {
            let path = dir.join(name);
            let file = SplitFile {
                x: x.iter().map(|row| AsRef::<[f64]>::as_ref(row)).collect(),
                y,
            };
            let json = serde_json::to_string(&file).map_err(|e| HandsignError::Parse {
                path: path.clone(),
                source: e,
            })?;
            std::fs::write(&path, json).map_err(|e| HandsignError::Io {
                path: path.clone(),
                source: e,
            })?;
        }

        tracing::info!(dir = %dir.display(), summary = %self.summary(), "Dataset split saved");
        Ok(())
    }
}
