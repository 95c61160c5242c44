//! Filesystem Merkle Tree
//!
//! Represents a directory subtree as a Merkle tree, where each node
//! (file or directory) has a deterministic hash based on content and
//! structure. The [`MerkleTree`] container owns the node graph and
//! exposes build, verification, query, and export operations over it.

pub mod builder;
pub mod export;
pub mod hasher;
pub mod node;
pub mod stats;

pub use builder::FileRecord;
pub use node::{DirectoryNode, FileNode, MerkleNode};
pub use stats::TreeStats;

use crate::error::MerkleError;
use crate::types::{self, Hash, DEFAULT_CHUNK_SIZE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Container for a built Merkle tree and its indexes.
///
/// `build` fully replaces all state; there is no incremental update path.
/// A fatal build failure leaves the tree cleared rather than reverting to
/// the previous tree.
pub struct MerkleTree {
    root: Option<MerkleNode>,
    content_index: HashMap<Hash, FileRecord>,
    all_nodes: Vec<PathBuf>,
    chunk_size: usize,
}

impl MerkleTree {
    /// Create an empty tree with the default chunk size.
    pub fn new() -> Self {
        Self {
            root: None,
            content_index: HashMap::new(),
            all_nodes: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create an empty tree with a custom chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self, MerkleError> {
        types::validate_chunk_size(chunk_size)?;
        let mut tree = Self::new();
        tree.chunk_size = chunk_size;
        Ok(tree)
    }

    /// Set the chunk size used by subsequent builds.
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<(), MerkleError> {
        types::validate_chunk_size(chunk_size)?;
        self.chunk_size = chunk_size;
        Ok(())
    }

    /// Current chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build the Merkle tree from a directory path, replacing any prior
    /// tree. Returns the root node on success.
    pub fn build(&mut self, path: &Path) -> Result<&MerkleNode, MerkleError> {
        // Full rebuild semantics: clear before building, so a failed build
        // leaves the tree empty rather than half-updated.
        self.root = None;
        self.content_index.clear();
        self.all_nodes.clear();

        let result = builder::TreeBuilder::new(self.chunk_size).build(path)?;

        self.content_index = result.content_index;
        self.all_nodes = result.all_nodes;
        Ok(&*self.root.insert(result.root))
    }

    /// Root node of the last successful build, if any.
    pub fn root(&self) -> Option<&MerkleNode> {
        self.root.as_ref()
    }

    /// Mutable access to the root node, e.g. for tamper testing.
    pub fn root_mut(&mut self) -> Option<&mut MerkleNode> {
        self.root.as_mut()
    }

    /// Verify tree integrity by recomputing hashes bottom-up and comparing
    /// against the stored values. Stops at the first mismatch.
    ///
    /// An empty tree is trivially valid. Recomputation happens into scratch
    /// values; stored hashes are never rewritten by verification.
    pub fn verify(&self) -> bool {
        self.root.as_ref().map_or(true, MerkleNode::verify)
    }

    /// Aggregate file/directory counts and total file size.
    pub fn stats(&self) -> TreeStats {
        stats::collect(self.root.as_ref())
    }

    /// Find the first node with the given name, depth-first.
    ///
    /// Names are unique among siblings but not across the tree, so this is
    /// "first found" in pre-order traversal (children in lexicographic
    /// order), not necessarily the only match.
    pub fn find_by_name(&self, name: &str) -> Option<&MerkleNode> {
        self.root.as_ref().and_then(|root| find_in(root, name))
    }

    /// Export the tree structure as JSON text.
    pub fn export_json(&self) -> String {
        export::to_json(self.root.as_ref())
    }

    /// Content-hash index over the files of the last build. Files sharing
    /// content collapse to a single entry, the most recently processed.
    pub fn file_objects(&self) -> &HashMap<Hash, FileRecord> {
        &self.content_index
    }

    /// Number of nodes created by the last build.
    pub fn node_count(&self) -> usize {
        self.all_nodes.len()
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

fn find_in<'a>(node: &'a MerkleNode, name: &str) -> Option<&'a MerkleNode> {
    if node.name() == name {
        return Some(node);
    }
    if let MerkleNode::Directory(dir) = node {
        for child in dir.children.values() {
            if let Some(found) = find_in(child, name) {
                return Some(found);
            }
        }
    }
    None
}
