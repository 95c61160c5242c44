//! Tree builder for constructing filesystem Merkle trees

use crate::error::MerkleError;
use crate::tree::hasher;
use crate::tree::node::{DirectoryNode, FileNode, MerkleNode};
use crate::types::Hash;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// Record of a file registered in the content-hash index.
///
/// The tree owns its nodes exclusively, so the index carries a lightweight
/// copy of what the file-objects view needs rather than a second reference
/// into the tree.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,
    pub chunk_hashes: Vec<Hash>,
}

/// Output of a full tree build
pub struct BuildResult {
    /// Root node with all hashes computed
    pub root: MerkleNode,
    /// Content digest to last-observed file record
    pub content_index: HashMap<Hash, FileRecord>,
    /// Paths of every node created during the build
    pub all_nodes: Vec<PathBuf>,
}

/// Tree builder for a single build pass
pub struct TreeBuilder {
    chunk_size: usize,
}

struct BuildState {
    content_index: HashMap<Hash, FileRecord>,
    all_nodes: Vec<PathBuf>,
}

impl TreeBuilder {
    /// Create a builder using the given chunk size for file hashing.
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Build the complete Merkle tree from a directory path.
    ///
    /// Nodes are constructed recursively in filesystem enumeration order;
    /// hashes are then computed post-order from the root, so every
    /// directory hash is derived from already-resolved child hashes.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn build(&self, path: &Path) -> Result<BuildResult, MerkleError> {
        let start = Instant::now();
        info!(chunk_size = self.chunk_size, "Starting tree build");

        if !path.exists() {
            return Err(MerkleError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(MerkleError::PathNotDirectory(path.to_path_buf()));
        }

        let mut state = BuildState {
            content_index: HashMap::new(),
            all_nodes: Vec::new(),
        };

        let mut root = self.build_node(path, &mut state)?;
        let root_hash = root.compute_hash();

        info!(
            node_count = state.all_nodes.len(),
            root_hash = %hex::encode(root_hash),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(BuildResult {
            root,
            content_index: state.content_index,
            all_nodes: state.all_nodes,
        })
    }

    fn build_node(&self, path: &Path, state: &mut BuildState) -> Result<MerkleNode, MerkleError> {
        let metadata = fs::metadata(path).map_err(|e| MerkleError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = node_name(path);

        if metadata.is_file() {
            trace!(path = %path.display(), "Hashing file");
            let file_digest = hasher::hash_file_content(path, self.chunk_size)?;

            state.content_index.insert(
                file_digest.content_hash,
                FileRecord {
                    name: name.clone(),
                    size: file_digest.size,
                    chunk_hashes: file_digest.chunk_hashes.clone(),
                },
            );
            state.all_nodes.push(path.to_path_buf());

            Ok(MerkleNode::File(FileNode {
                name,
                hash: None,
                content_hash: file_digest.content_hash,
                chunk_hashes: file_digest.chunk_hashes,
                size: file_digest.size,
            }))
        } else if metadata.is_dir() {
            let mut dir = DirectoryNode::new(name);

            // Enumeration failure on the directory itself is fatal; a child
            // entry that fails to build is logged and skipped.
            let entries = fs::read_dir(path).map_err(|e| MerkleError::DirectoryRead {
                path: path.to_path_buf(),
                source: e,
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| MerkleError::DirectoryRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                let child_path = entry.path();

                match self.build_node(&child_path, state) {
                    Ok(child) => dir.add_child(child),
                    Err(e) => {
                        warn!(path = %child_path.display(), error = %e, "Skipping entry");
                    }
                }
            }

            debug!(path = %path.display(), children = dir.children.len(), "Built directory node");
            state.all_nodes.push(path.to_path_buf());
            Ok(MerkleNode::Directory(dir))
        } else {
            // Sockets, fifos, and similar are per-entry skips for the parent.
            Err(MerkleError::FileAccess {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "not a regular file or directory",
                ),
            })
        }
    }
}

fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
