use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use expense_tracker::clock::SystemClock;
use expense_tracker::config::TrackerConfig;
use expense_tracker::run_shell;
use expense_tracker::storage::FileStorage;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(version)]
#[command(about = "Record income and expenses and track your balance", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the transaction snapshot (overrides the config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.storage.dir = dir;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let storage = FileStorage::new(config.storage.dir.clone()).with_context(|| {
        format!(
            "Failed to open data directory '{}'",
            config.storage.dir.display()
        )
    })?;

    let stdin = io::stdin();
    run_shell(
        stdin.lock(),
        io::stdout(),
        storage,
        SystemClock,
        &config.storage.key,
        config.view_settings(),
    )
    .context("Failed to run the tracker")?;

    Ok(())
}
