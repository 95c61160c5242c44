//! SHA-256 digests and chunked file hashing

use crate::error::MerkleError;
use crate::types::Hash;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Compute the SHA-256 digest of a byte sequence.
pub fn digest(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute a directory's Merkle hash from its children.
///
/// Children must arrive in lexicographic name order; the hash covers the
/// concatenation of `"<name>:<child_hash_hex>;"` per child. A directory
/// with no children hashes to the digest of its own name.
pub fn directory_digest<'a, I>(name: &str, children: I) -> Hash
where
    I: IntoIterator<Item = (&'a str, Hash)>,
{
    let mut combined = String::new();
    for (child_name, child_hash) in children {
        combined.push_str(child_name);
        combined.push(':');
        combined.push_str(&hex::encode(child_hash));
        combined.push(';');
    }

    if combined.is_empty() {
        digest(name.as_bytes())
    } else {
        digest(combined.as_bytes())
    }
}

/// Result of chunked file hashing
#[derive(Debug, Clone)]
pub struct FileDigest {
    /// Digest of the file's full byte content
    pub content_hash: Hash,
    /// Total bytes read
    pub size: u64,
    /// Per-chunk digests in file-offset order; empty for an empty file
    pub chunk_hashes: Vec<Hash>,
}

/// Hash a file's content in fixed-size windows.
///
/// Each non-empty window contributes one chunk digest; the whole-content
/// digest is accumulated incrementally from the same windows, so the file
/// is never held in memory in full.
pub fn hash_file_content(path: &Path, chunk_size: usize) -> Result<FileDigest, MerkleError> {
    let mut file = File::open(path).map_err(|e| MerkleError::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut buffer = vec![0u8; chunk_size];
    let mut chunk_hashes = Vec::new();
    let mut content_hasher = Sha256::new();
    let mut size: u64 = 0;

    loop {
        // A single read may return less than a full window.
        let mut filled = 0;
        while filled < chunk_size {
            let n = file
                .read(&mut buffer[filled..])
                .map_err(|e| MerkleError::FileAccess {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            break;
        }

        let window = &buffer[..filled];
        content_hasher.update(window);
        chunk_hashes.push(digest(window));
        size += filled as u64;

        if filled < chunk_size {
            break;
        }
    }

    trace!(
        path = %path.display(),
        size,
        chunks = chunk_hashes.len(),
        "Hashed file content"
    );

    Ok(FileDigest {
        content_hash: content_hasher.finalize().into(),
        size,
        chunk_hashes,
    })
}
