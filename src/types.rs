//! Core types and constants for the Merkle tree file system.

use crate::error::MerkleError;

/// Hash: 256-bit SHA-256 digest value
pub type Hash = [u8; 32];

/// Default chunk size for file processing (1 MB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Minimum allowed chunk size (1 KB)
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Maximum allowed chunk size (100 MB)
pub const MAX_CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Check a chunk size against the configured bounds.
pub fn validate_chunk_size(size: usize) -> Result<(), MerkleError> {
    if (MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(MerkleError::InvalidChunkSize { size })
    }
}
