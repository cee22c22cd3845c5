//! Show store statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use handsign_hand_model::{load_records, CollectedRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StoreInfo {
    records: usize,
    hands: BTreeSet<usize>,
    first_timestamp: Option<f64>,
    last_timestamp: Option<f64>,
    unlabeled: usize,
    labels: BTreeMap<String, usize>,
}

impl StoreInfo {
    fn from_records(records: &[CollectedRecord]) -> Self {
        let mut labels = BTreeMap::new();
        let mut unlabeled = 0;
        for record in records {
            match &record.gesture {
                Some(tag) => *labels.entry(tag.clone()).or_insert(0) += 1,
                None => unlabeled += 1,
            }
        }

        let timestamps = records.iter().map(|r| r.timestamp);
        Self {
            records: records.len(),
            hands: records.iter().map(|r| r.hand_index).collect(),
            first_timestamp: timestamps.clone().reduce(f64::min),
            last_timestamp: timestamps.reduce(f64::max),
            unlabeled,
            labels,
        }
    }
}

pub fn run(store: PathBuf, json: bool) -> anyhow::Result<()> {
    let records =
        load_records(&store).map_err(|e| anyhow::anyhow!("Failed to load store: {e}"))?;
    let info = StoreInfo::from_records(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Store: {}", store.display());
    println!("  Records: {}", info.records);
    println!("  Hand indices: {:?}", info.hands);
    if let (Some(first), Some(last)) = (info.first_timestamp, info.last_timestamp) {
        println!("  Time span: {first:.3}s .. {last:.3}s ({:.1}s)", last - first);
    }
    println!();

    println!("Annotations:");
    println!("  (none): {}", info.unlabeled);
    for (tag, count) in &info.labels {
        println!("  {tag}: {count}");
    }

    Ok(())
}
