//! Show or initialize configuration.

use std::path::PathBuf;

use handsign_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);

    if init {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        AppConfig::default().save_to(&path)?;
        println!("Wrote default configuration to: {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
