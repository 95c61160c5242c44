//! Aggregate statistics over a built tree

use crate::tree::node::MerkleNode;

/// Aggregate counts and sizes for a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of file nodes
    pub files: usize,
    /// Number of directory nodes, empty ones included
    pub directories: usize,
    /// Sum of file sizes in bytes
    pub total_size: u64,
}

/// Collect statistics in a single O(n) traversal.
///
/// Uses an explicit work stack so arbitrarily deep trees cannot exhaust
/// the call stack.
pub fn collect(root: Option<&MerkleNode>) -> TreeStats {
    let mut stats = TreeStats::default();
    let mut stack: Vec<&MerkleNode> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        match node {
            MerkleNode::File(file) => {
                stats.files += 1;
                stats.total_size += file.size;
            }
            MerkleNode::Directory(dir) => {
                stats.directories += 1;
                stack.extend(dir.children.values());
            }
        }
    }

    stats
}
