//! Out-of-band annotation of stored records.

use std::path::PathBuf;

use handsign_common::config::AppConfig;
use handsign_gesture_core::GestureClassifier;
use handsign_hand_model::{load_records, save_records, CollectedRecord};

pub fn run(
    config: &AppConfig,
    store: PathBuf,
    tag: String,
    from: Option<usize>,
    to: Option<usize>,
    auto: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut records =
        load_records(&store).map_err(|e| anyhow::anyhow!("Failed to load store: {e}"))?;

    let classifier = if auto {
        Some(GestureClassifier::from_config(&config.classifier)?)
    } else {
        None
    };

    let from = from.unwrap_or(0);
    let to = to.unwrap_or(records.len());
    let labeled = annotate_range(&mut records, &tag, from, to, classifier.as_ref())?;

    let target = output.unwrap_or(store);
    save_records(&target, &records)?;

    println!(
        "Labeled {labeled} of {} record(s) as '{tag}' in range {from}..{to}",
        records.len()
    );
    println!("Saved to: {}", target.display());
    Ok(())
}

/// Tag records `from..to`. With a classifier, only records it labels `tag`
/// are touched. Returns how many records were tagged.
fn annotate_range(
    records: &mut [CollectedRecord],
    tag: &str,
    from: usize,
    to: usize,
    classifier: Option<&GestureClassifier>,
) -> anyhow::Result<usize> {
    if from > to || to > records.len() {
        anyhow::bail!(
            "Range {from}..{to} is outside the store's {} record(s)",
            records.len()
        );
    }

    let mut labeled = 0;
    for record in &mut records[from..to] {
        let selected = match classifier {
            Some(c) => c
                .classify(&record.landmarks)
                .is_some_and(|label| label.as_str() == tag),
            None => true,
        };
        if selected {
            *record = record.annotate(tag);
            labeled += 1;
        }
    }
    Ok(labeled)
}
