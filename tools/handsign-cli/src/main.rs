//! Handsign CLI: command-line interface for gesture replay and dataset preparation.
//!
//! Usage:
//!   handsign capture                 Run the gesture pipeline over streamed frames
//!   handsign replay [STORE]          Run the gesture pipeline over a recorded store
//!   handsign label [STORE] --tag T   Annotate records out of band
//!   handsign prepare [STORE]         Build the train/test split
//!   handsign info [STORE]            Show store statistics
//!   handsign config                  Show or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use handsign_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handsign",
    about = "Rule-based hand gesture recognition and landmark dataset tooling",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize gestures in frames streamed as JSON lines (one frame per line)
    Capture {
        /// Read frames from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Record every observed hand and save the store here on exit
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// Replay a recorded store through classifier and debouncer
    Replay {
        /// Path to the landmark store (defaults to the configured store)
        store: Option<PathBuf>,

        /// Record the replayed hands and save them as a new store
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// Annotate a range of records with a gesture tag
    Label {
        /// Path to the landmark store (defaults to the configured store)
        store: Option<PathBuf>,

        /// Tag written into the `gesture` field
        #[arg(short, long)]
        tag: String,

        /// First record to annotate (inclusive)
        #[arg(long)]
        from: Option<usize>,

        /// Last record to annotate (exclusive)
        #[arg(long)]
        to: Option<usize>,

        /// Only annotate records the classifier labels as the tag
        #[arg(long)]
        auto: bool,

        /// Output store (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a seeded train/test split from a store
    Prepare {
        /// Path to the landmark store (defaults to the configured store)
        store: Option<PathBuf>,

        /// Fraction of rows held out for testing
        #[arg(long)]
        test_fraction: Option<f64>,

        /// Shuffle seed
        #[arg(long)]
        seed: Option<u64>,

        /// Annotation counted as the positive class
        #[arg(long)]
        positive_tag: Option<String>,

        /// Directory for train.json and test.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show store statistics
    Info {
        /// Path to the landmark store (defaults to the configured store)
        store: Option<PathBuf>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration, or write the defaults
    Config {
        /// Write default configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config --init` writes defaults and must not depend on the file it replaces
    let initializing = matches!(cli.command, Commands::Config { init: true });
    let loaded = match &cli.config {
        _ if initializing => Ok(AppConfig::default()),
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let mut config = loaded.map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    handsign_common::logging::init_logging(&config.logging);

    let store_or_default =
        |store: Option<PathBuf>| store.unwrap_or_else(|| config.capture.store_path.clone());

    match cli.command {
        Commands::Capture { input, record } => commands::capture::run(&config, input, record).await,
        Commands::Replay { store, record } => {
            commands::replay::run(&config, store_or_default(store), record).await
        }
        Commands::Label {
            store,
            tag,
            from,
            to,
            auto,
            output,
        } => commands::label::run(
            &config,
            store_or_default(store),
            tag,
            from,
            to,
            auto,
            output,
        ),
        Commands::Prepare {
            store,
            test_fraction,
            seed,
            positive_tag,
            output,
        } => commands::prepare::run(
            &config,
            store_or_default(store),
            test_fraction,
            seed,
            positive_tag,
            output,
        ),
        Commands::Info { store, json } => commands::info::run(store_or_default(store), json),
        Commands::Config { init } => commands::config::run(&config, cli.config, init),
    }
}
