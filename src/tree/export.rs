//! Structural JSON exporter
//!
//! Emits the tree in a fixed textual shape: two-space indentation per
//! nesting depth, children in lexicographic order, and stable key names.
//! External consumers parse this output by structural markers, so the
//! exact layout is part of the contract.

use crate::tree::node::MerkleNode;

/// Export a tree as JSON text; an empty tree exports as `{}`.
pub fn to_json(root: Option<&MerkleNode>) -> String {
    match root {
        None => "{}".to_string(),
        Some(node) => {
            let mut out = String::from("{\n");
            write_node(&mut out, node, 1);
            out.push_str("\n}");
            out
        }
    }
}

fn write_node(out: &mut String, node: &MerkleNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let child_indent = "  ".repeat(depth + 1);

    out.push_str(&format!("{}{}: {{\n", indent, json_string(node.name())));
    out.push_str(&format!(
        "{}\"type\": \"{}\",\n",
        child_indent,
        if node.is_file() { "file" } else { "directory" }
    ));
    out.push_str(&format!(
        "{}\"hash\": \"{}\"",
        child_indent,
        node.hash().map(hex::encode).unwrap_or_default()
    ));

    match node {
        MerkleNode::File(file) => {
            out.push_str(&format!(",\n{}\"size\": {}", child_indent, file.size));
            out.push_str(&format!(
                ",\n{}\"chunks\": {}",
                child_indent,
                file.chunk_hashes.len()
            ));
            out.push_str(&format!(
                ",\n{}\"content_hash\": \"{}\"",
                child_indent,
                hex::encode(file.content_hash)
            ));
        }
        MerkleNode::Directory(dir) if !dir.children.is_empty() => {
            out.push_str(&format!(",\n{}\"children\": {{\n", child_indent));

            let count = dir.children.len();
            for (i, child) in dir.children.values().enumerate() {
                write_node(out, child, depth + 2);
                if i + 1 < count {
                    out.push(',');
                }
                out.push('\n');
            }

            out.push_str(&format!("{}}}", child_indent));
        }
        MerkleNode::Directory(_) => {}
    }

    out.push_str(&format!("\n{}}}", indent));
}

/// Render a node name as a quoted, escaped JSON string.
fn json_string(name: &str) -> String {
    serde_json::to_string(name).unwrap_or_else(|_| format!("\"{}\"", name))
}
