//! Reward Points Calculator: interactive terminal front-end.
//!
//! Loads the persisted reward schedule, then drives a calculator session
//! from commands typed at the prompt.

mod command;
mod render;
mod repl;

use clap::Parser;
use reward_core::config::{AppConfig, StorageBackend};
use reward_loyalty::CalculatorSession;
use reward_store::{ConfigStore, FileStore, KeyValueStore, MemoryStore};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "reward-calc")]
#[command(about = "Convert spending into reward points and find the spend needed to reach a threshold")]
#[command(version)]
struct Cli {
    /// Configuration store file (overrides config)
    #[arg(long, env = "REWARD_CALC__STORAGE__PATH")]
    store_path: Option<PathBuf>,

    /// Key the reward configuration is stored under (overrides config)
    #[arg(long, env = "REWARD_CALC__STORAGE__KEY")]
    storage_key: Option<String>,

    /// Keep the configuration in memory only
    #[arg(long, default_value_t = false)]
    memory: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the prompt on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reward_calc=info,reward_store=warn,reward_loyalty=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(path) = cli.store_path {
        config.storage.path = path.to_string_lossy().into_owned();
    }
    if let Some(key) = cli.storage_key {
        config.storage.key = key;
    }
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }

    info!(
        backend = ?config.storage.backend,
        path = %config.storage.path,
        key = %config.storage.key,
        "Configuration loaded"
    );

    let store: Box<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Box::new(FileStore::new(&config.storage.path)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    let mut session = CalculatorSession::new(ConfigStore::open(store, config.storage.key));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout)?;

    info!("Reward calculator shut down");
    Ok(())
}
