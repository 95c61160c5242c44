//! mtfs: Merkle Tree File System
//!
//! Converts a directory tree into a Merkle tree: every file's content is
//! chunked and hashed, every directory's hash is derived from its children,
//! and the resulting root hash certifies the contents and structure of the
//! entire subtree.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;
pub mod types;
