//! Build the train/test split from a store.

use std::path::PathBuf;

use handsign_common::config::AppConfig;
use handsign_dataset::DatasetBuilder;

pub fn run(
    config: &AppConfig,
    store: PathBuf,
    test_fraction: Option<f64>,
    seed: Option<u64>,
    positive_tag: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let defaults = &config.dataset;
    let builder = DatasetBuilder::new(
        positive_tag.unwrap_or_else(|| defaults.positive_tag.clone()),
        test_fraction.unwrap_or(defaults.test_fraction),
        seed.unwrap_or(defaults.seed),
    )?;

    println!("Preparing dataset from: {}", store.display());
    println!("  Positive tag: {}", builder.positive_tag());

    let split = builder
        .build(&store)
        .map_err(|e| anyhow::anyhow!("Failed to prepare dataset: {e}"))?;

    let summary = split.summary();
    println!("  Rows: {}", summary.train + summary.test);
    println!("  Split: {summary}");

    if let Some(dir) = output {
        split.save(&dir)?;
        println!("Saved train.json and test.json to: {}", dir.display());
    }
    Ok(())
}
