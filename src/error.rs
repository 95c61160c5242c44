//! Error types for the Merkle tree file system.

use crate::types::{MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use std::path::PathBuf;
use thiserror::Error;

/// Tree-construction and query errors
#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("Invalid chunk size {size}. Must be between {MIN_CHUNK_SIZE} and {MAX_CHUNK_SIZE} bytes")]
    InvalidChunkSize { size: usize },

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    PathNotDirectory(PathBuf),

    #[error("Cannot read file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot add child to a file node: {0}")]
    InvalidInsert(String),
}

/// Configuration and startup errors for the CLI surface
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid log level: {0}")]
    LogLevel(String),

    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    LogFormat(String),

    #[error(transparent)]
    Tree(#[from] MerkleError),
}
