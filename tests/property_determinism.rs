//! Property-based tests for digest and chunking guarantees

use mtfs::tree::hasher;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

proptest! {
    /// Same bytes always digest to the same value.
    #[test]
    fn prop_digest_deterministic(content in proptest::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(hasher::digest(&content), hasher::digest(&content));
    }

    /// The content hash equals the digest of the full bytes regardless of
    /// the chunk size used to read them, and the chunk count is
    /// ceil(size / chunk_size).
    #[test]
    fn prop_content_hash_independent_of_chunk_size(
        content in proptest::collection::vec(any::<u8>(), 0..16384),
        chunk_size in 1024usize..8192,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data");
        fs::write(&path, &content).unwrap();

        let result = hasher::hash_file_content(&path, chunk_size).unwrap();

        prop_assert_eq!(result.content_hash, hasher::digest(&content));
        prop_assert_eq!(result.size, content.len() as u64);
        prop_assert_eq!(result.chunk_hashes.len(), content.len().div_ceil(chunk_size));
    }

    /// Sibling insertion order never changes a directory's hash; only the
    /// sorted name/hash sequence matters.
    #[test]
    fn prop_directory_hash_ignores_insertion_order(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..8),
    ) {
        use mtfs::tree::{DirectoryNode, FileNode, MerkleNode};

        let file = |name: &str| {
            MerkleNode::File(FileNode {
                name: name.to_string(),
                hash: None,
                content_hash: hasher::digest(name.as_bytes()),
                chunk_hashes: Vec::new(),
                size: name.len() as u64,
            })
        };

        let mut forward = DirectoryNode::new("dir");
        for name in &names {
            forward.add_child(file(name));
        }

        let mut reversed = DirectoryNode::new("dir");
        for name in names.iter().rev() {
            reversed.add_child(file(name));
        }

        prop_assert_eq!(
            MerkleNode::Directory(forward).compute_hash(),
            MerkleNode::Directory(reversed).compute_hash()
        );
    }
}
