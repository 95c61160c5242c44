//! Filesystem node types and Merkle hash computation

use crate::error::MerkleError;
use crate::tree::hasher;
use crate::types::Hash;
use std::cell::Cell;
use std::collections::BTreeMap;

/// File node representation
#[derive(Debug, Clone)]
pub struct FileNode {
    /// Name of the file, unique among siblings
    pub name: String,
    /// Merkle hash; `None` until computed
    pub hash: Option<Hash>,
    /// Digest of the file's full byte content
    pub content_hash: Hash,
    /// Per-chunk digests in file-offset order
    pub chunk_hashes: Vec<Hash>,
    /// File size in bytes
    pub size: u64,
}

/// Directory node representation
///
/// A directory exclusively owns its children by value. `BTreeMap` iterates
/// keys in lexicographic order, which is the ordering contract used for
/// hashing, export, and printing alike.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// Name of the directory, unique among siblings
    pub name: String,
    /// Merkle hash; `None` until computed
    pub hash: Option<Hash>,
    /// Child nodes keyed by name
    pub children: BTreeMap<String, MerkleNode>,
    cached_depth: Cell<Option<usize>>,
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: None,
            children: BTreeMap::new(),
            cached_depth: Cell::new(None),
        }
    }

    /// Insert a child, keyed by its name. Clears the cached depth.
    pub fn add_child(&mut self, child: MerkleNode) {
        self.cached_depth.set(None);
        self.children.insert(child.name().to_string(), child);
    }

    /// Depth of this directory: 0 when childless, else one more than the
    /// deepest child. Cached until the next direct child insertion.
    pub fn depth(&self) -> usize {
        if let Some(depth) = self.cached_depth.get() {
            return depth;
        }

        let depth = self
            .children
            .values()
            .map(MerkleNode::depth)
            .max()
            .map_or(0, |max| max + 1);
        self.cached_depth.set(Some(depth));
        depth
    }
}

/// A node in the Merkle tree: a file leaf or a directory with named children
#[derive(Debug, Clone)]
pub enum MerkleNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl MerkleNode {
    /// Name of the file or directory.
    pub fn name(&self) -> &str {
        match self {
            MerkleNode::File(file) => &file.name,
            MerkleNode::Directory(dir) => &dir.name,
        }
    }

    /// Whether this node is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, MerkleNode::File(_))
    }

    /// Stored Merkle hash, if computed.
    pub fn hash(&self) -> Option<Hash> {
        match self {
            MerkleNode::File(file) => file.hash,
            MerkleNode::Directory(dir) => dir.hash,
        }
    }

    /// Add a child node. Fails on file nodes, which can never have children.
    pub fn add_child(&mut self, child: MerkleNode) -> Result<(), MerkleError> {
        match self {
            MerkleNode::File(file) => Err(MerkleError::InvalidInsert(file.name.clone())),
            MerkleNode::Directory(dir) => {
                dir.add_child(child);
                Ok(())
            }
        }
    }

    /// Compute and store this node's Merkle hash, post-order.
    ///
    /// A file's hash is its content hash. A directory's hash covers its
    /// children sorted by name; an empty directory hashes its own name.
    pub fn compute_hash(&mut self) -> Hash {
        match self {
            MerkleNode::File(file) => {
                let hash = file.content_hash;
                file.hash = Some(hash);
                hash
            }
            MerkleNode::Directory(dir) => {
                let mut child_hashes: Vec<(String, Hash)> = Vec::with_capacity(dir.children.len());
                for (name, child) in dir.children.iter_mut() {
                    child_hashes.push((name.clone(), child.compute_hash()));
                }

                let hash = hasher::directory_digest(
                    &dir.name,
                    child_hashes.iter().map(|(name, hash)| (name.as_str(), *hash)),
                );
                dir.hash = Some(hash);
                hash
            }
        }
    }

    /// Recompute this subtree's hashes into scratch values and compare
    /// against the stored ones, children first. Returns false at the first
    /// mismatch. Stored hashes are left untouched.
    pub fn verify(&self) -> bool {
        match self {
            MerkleNode::File(file) => file.hash == Some(file.content_hash),
            MerkleNode::Directory(dir) => {
                for child in dir.children.values() {
                    if !child.verify() {
                        return false;
                    }
                }

                // All children verified, so their stored hashes are correct
                // inputs for recomputing this directory's hash.
                let mut child_hashes: Vec<(&str, Hash)> = Vec::with_capacity(dir.children.len());
                for (name, child) in &dir.children {
                    match child.hash() {
                        Some(hash) => child_hashes.push((name.as_str(), hash)),
                        None => return false,
                    }
                }

                dir.hash == Some(hasher::directory_digest(&dir.name, child_hashes))
            }
        }
    }

    /// Depth of this node: 0 for files and childless directories.
    pub fn depth(&self) -> usize {
        match self {
            MerkleNode::File(_) => 0,
            MerkleNode::Directory(dir) => dir.depth(),
        }
    }
}
