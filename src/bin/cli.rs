//! SnapKV CLI
//!
//! Command-line interface for a snapshot file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use snapkv::{Config, Format, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// SnapKV CLI
#[derive(Parser, Debug)]
#[command(name = "snapkv")]
#[command(about = "CLI for a SnapKV snapshot file")]
#[command(version)]
struct Args {
    /// Backing file
    #[arg(short, long, default_value = "./snapkv.dat")]
    file: PathBuf,

    /// Snapshot format: binary or json (must match the existing file)
    #[arg(long, default_value = "binary")]
    format: Format,

    /// Pretty-print JSON snapshots
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Remove a key
    Remove {
        /// The key to remove
        key: String,
    },

    /// List every entry
    List,

    /// Remove every entry
    Clear,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snapkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

/// Returns `false` when `get` misses
fn run(args: Args) -> snapkv::Result<bool> {
    let config = Config::builder()
        .path(&args.file)
        .format(args.format)
        .json_pretty(args.pretty)
        .create_dirs(true)
        .build()?;

    let mut store: Store<String, String> = Store::open_with_config(&config)?;
    let mut found = true;

    match args.command {
        Commands::Get { key } => match store.get(&key) {
            Some(value) => println!("{}", value),
            None => {
                tracing::info!("key not found: {}", key);
                found = false;
            }
        },
        Commands::Set { key, value } => {
            store.set(key, value);
            store.persist()?;
        }
        Commands::Remove { key } => {
            if store.remove(&key).is_none() {
                tracing::info!("key not found: {}", key);
            }
            store.persist()?;
        }
        Commands::List => {
            for (key, value) in store.iter() {
                println!("{}\t{}", key, value);
            }
        }
        Commands::Clear => {
            store.flush();
            store.persist()?;
        }
    }

    store.close()?;
    Ok(found)
}
