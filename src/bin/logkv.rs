//! logkv CLI
//!
//! Opens the store, reports the recovered state and optionally runs one
//! operation against it.

use clap::{Parser, Subcommand};
use logkv::{Config, KeyValueIndex, RecoveryMode, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// logkv - append-only log backed key-value store
#[derive(Parser, Debug)]
#[command(name = "logkv")]
#[command(about = "Durable key-value store backed by an append-only log")]
#[command(version)]
struct Args {
    /// Log file path
    #[arg(short, long, default_value = "db.log")]
    log_path: String,

    /// fsync after every append
    #[arg(long)]
    sync: bool,

    /// Skip undecodable log lines during recovery instead of failing
    #[arg(long)]
    skip_malformed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the recovered state (default)
    Show,

    /// Insert a new key
    Insert {
        /// The key to insert
        key: String,

        /// The value to store
        value: String,
    },

    /// Update an existing key
    Update {
        /// The key to update
        key: String,

        /// The new value
        value: String,
    },

    /// Print the value of a key
    Select {
        /// The key to look up
        key: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("logkv v{}", logkv::VERSION);
    tracing::info!("Log path: {}", args.log_path);

    let config = Config::builder()
        .log_path(&args.log_path)
        .sync_strategy(if args.sync {
            SyncStrategy::EveryWrite
        } else {
            SyncStrategy::OsBuffered
        })
        .recovery_mode(if args.skip_malformed {
            RecoveryMode::SkipMalformed
        } else {
            RecoveryMode::Strict
        })
        .build();

    if let Err(e) = run(config, args.command.unwrap_or(Commands::Show)) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = KeyValueIndex::open(config)?;

    match command {
        Commands::Show => {
            tracing::info!(
                "Recovery: {}",
                serde_json::to_string(index.recovery())?
            );
            println!("{}", serde_json::to_string_pretty(&index.snapshot())?);
        }
        Commands::Insert { key, value } => {
            index.insert(&key, &value)?;
            println!("OK");
        }
        Commands::Update { key, value } => {
            index.update(&key, &value)?;
            println!("OK");
        }
        Commands::Select { key } => match index.select(&key) {
            Some(value) => println!("{}", value),
            None => {
                println!("(not found)");
            }
        },
    }

    Ok(())
}
