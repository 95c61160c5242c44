//! Integration tests for tree building determinism and hash propagation

use mtfs::tree::{hasher, MerkleNode, MerkleTree};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn build_root_hash(path: &Path) -> [u8; 32] {
    let mut tree = MerkleTree::new();
    tree.build(path).unwrap();
    tree.root().and_then(MerkleNode::hash).unwrap()
}

/// Same directory contents always produce the same root hash.
#[test]
fn test_same_filesystem_same_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();
    fs::create_dir(root.join("dir1")).unwrap();
    fs::write(root.join("dir1").join("file3.txt"), "content3").unwrap();

    assert_eq!(build_root_hash(root), build_root_hash(root));
}

/// Identical contents under directories of the same name hash identically
/// even when built from different filesystem locations.
#[test]
fn test_same_contents_different_location_same_root() {
    let temp_a = TempDir::new().unwrap();
    let temp_b = TempDir::new().unwrap();

    for base in [temp_a.path(), temp_b.path()] {
        fs::create_dir(base.join("project")).unwrap();
        fs::write(base.join("project").join("a.txt"), "alpha").unwrap();
        fs::create_dir(base.join("project").join("sub")).unwrap();
        fs::write(base.join("project").join("sub").join("b.txt"), "beta").unwrap();
    }

    assert_eq!(
        build_root_hash(&temp_a.path().join("project")),
        build_root_hash(&temp_b.path().join("project"))
    );
}

/// Modifying file content changes the file hash and every ancestor hash.
#[test]
fn test_content_change_propagates_to_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("file.txt"), "before").unwrap();

    let mut tree = MerkleTree::new();
    tree.build(root).unwrap();
    let root_before = tree.root().and_then(MerkleNode::hash).unwrap();
    let sub_before = tree.find_by_name("sub").and_then(MerkleNode::hash).unwrap();
    let file_before = tree
        .find_by_name("file.txt")
        .and_then(MerkleNode::hash)
        .unwrap();

    fs::write(root.join("sub").join("file.txt"), "after!").unwrap();
    tree.build(root).unwrap();

    assert_ne!(
        tree.find_by_name("file.txt")
            .and_then(MerkleNode::hash)
            .unwrap(),
        file_before
    );
    assert_ne!(
        tree.find_by_name("sub").and_then(MerkleNode::hash).unwrap(),
        sub_before
    );
    assert_ne!(tree.root().and_then(MerkleNode::hash).unwrap(), root_before);
}

/// Renaming a file changes ancestor hashes but not the content hash.
#[test]
fn test_rename_changes_ancestors_not_content_hash() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("old.txt"), "stable bytes").unwrap();

    let mut tree = MerkleTree::new();
    tree.build(root).unwrap();
    let root_before = tree.root().and_then(MerkleNode::hash).unwrap();

    fs::rename(root.join("old.txt"), root.join("new.txt")).unwrap();
    tree.build(root).unwrap();

    assert_ne!(tree.root().and_then(MerkleNode::hash).unwrap(), root_before);
    match tree.find_by_name("new.txt").unwrap() {
        MerkleNode::File(file) => {
            assert_eq!(file.content_hash, hasher::digest(b"stable bytes"));
        }
        MerkleNode::Directory(_) => panic!("expected a file node"),
    }
}

/// Chunk size affects chunk hashes but never content or root hashes.
#[test]
fn test_root_hash_independent_of_chunk_size() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("big.bin"), vec![0x42u8; 5000]).unwrap();

    let mut small = MerkleTree::with_chunk_size(1024).unwrap();
    small.build(root).unwrap();
    let mut large = MerkleTree::with_chunk_size(4096).unwrap();
    large.build(root).unwrap();

    assert_eq!(
        small.root().and_then(MerkleNode::hash),
        large.root().and_then(MerkleNode::hash)
    );

    let chunks = |tree: &MerkleTree| match tree.find_by_name("big.bin").unwrap() {
        MerkleNode::File(file) => file.chunk_hashes.len(),
        MerkleNode::Directory(_) => panic!("expected a file node"),
    };
    assert_eq!(chunks(&small), 5);
    assert_eq!(chunks(&large), 2);
}

/// An empty directory named X hashes to digest("X") anywhere in the tree.
#[test]
fn test_empty_directory_rule() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("X")).unwrap();
    fs::create_dir_all(root.join("nested").join("deeper").join("X2")).unwrap();

    let mut tree = MerkleTree::new();
    tree.build(root).unwrap();

    assert_eq!(
        tree.find_by_name("X").and_then(MerkleNode::hash),
        Some(hasher::digest(b"X"))
    );
    assert_eq!(
        tree.find_by_name("X2").and_then(MerkleNode::hash),
        Some(hasher::digest(b"X2"))
    );
}
