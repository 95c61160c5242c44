//! mtfs CLI Binary
//!
//! Interactive command-line interface for the Merkle tree file system.

use clap::Parser;
use mtfs::cli;
use mtfs::config::ConfigLoader;
use mtfs::logging::init_logging;
use mtfs::tree::MerkleTree;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "mtfs",
    about = "Merkle tree file system: directory integrity via chunked hashing",
    version
)]
struct Cli {
    /// Chunk size in bytes for file hashing
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable diagnostic logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut settings = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Logging stays off unless requested; the stdout protocol is the
    // primary surface and stderr noise is opt-in.
    match (&cli.log_level, cli.verbose) {
        (Some(level), _) => settings.logging.level = level.clone(),
        (None, false) => settings.logging.level = "off".to_string(),
        (None, true) => {}
    }
    if let Some(format) = &cli.log_format {
        settings.logging.format = format.clone();
    }

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let chunk_size = cli.chunk_size.unwrap_or(settings.chunk_size);
    let mut tree = match MerkleTree::with_chunk_size(chunk_size) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(chunk_size, "mtfs starting");

    if let Err(e) = cli::run(&mut tree) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
