//! Integration tests for the JSON export contract

use mtfs::tree::{hasher, MerkleTree};
use std::fs;
use tempfile::TempDir;

/// Scenario: directory `data` containing `a.txt` = "hello". The export's
/// exact textual shape is part of the external contract.
#[test]
fn test_single_file_export_exact_shape() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "hello").unwrap();

    let mut tree = MerkleTree::new();
    tree.build(&data).unwrap();

    let content_hash = hex::encode(hasher::digest(b"hello"));
    let root_hash = hex::encode(hasher::digest(
        format!("a.txt:{};", content_hash).as_bytes(),
    ));

    let expected = format!(
        r#"{{
  "data": {{
    "type": "directory",
    "hash": "{root_hash}",
    "children": {{
      "a.txt": {{
        "type": "file",
        "hash": "{content_hash}",
        "size": 5,
        "chunks": 1,
        "content_hash": "{content_hash}"
      }}
    }}
  }}
}}"#
    );
    assert_eq!(tree.export_json(), expected);
}

#[test]
fn test_export_children_sorted_and_parseable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("zeta.txt"), "z").unwrap();
    fs::write(root.join("alpha.txt"), "a").unwrap();
    fs::create_dir(root.join("mid")).unwrap();

    let mut tree = MerkleTree::new();
    tree.build(root).unwrap();
    let json = tree.export_json();

    let alpha = json.find("\"alpha.txt\"").unwrap();
    let mid = json.find("\"mid\"").unwrap();
    let zeta = json.find("\"zeta.txt\"").unwrap();
    assert!(alpha < mid && mid < zeta);

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let root_name = parsed.as_object().unwrap().keys().next().unwrap().clone();
    assert_eq!(parsed[&root_name]["type"], "directory");
    assert_eq!(parsed[&root_name]["children"]["alpha.txt"]["size"], 1);
    // Empty directories carry no children object.
    assert!(parsed[&root_name]["children"]["mid"]["children"].is_null());
}

#[test]
fn test_empty_tree_exports_empty_object() {
    let tree = MerkleTree::new();
    assert_eq!(tree.export_json(), "{}");
}
