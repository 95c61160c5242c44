//! Interactive menu front-end
//!
//! A blocking command loop over stdin/stdout: operations are selected by an
//! integer tag and results are emitted line-oriented. External front-ends
//! parse this output by a fixed marker vocabulary ("Merkle tree built
//! successfully", "Error:", "Root hash:", the box-drawing tree prefixes,
//! and so on), so the wording of those lines is a stable contract.

use crate::tree::{FileRecord, MerkleNode, MerkleTree};
use crate::types::Hash;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Run the interactive menu loop on stdin/stdout.
pub fn run(tree: &mut MerkleTree) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(stdin.lock(), stdout.lock(), tree)
}

/// Menu loop over arbitrary input/output streams.
pub fn run_loop<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    tree: &mut MerkleTree,
) -> io::Result<()> {
    let mut tree_built = false;

    loop {
        print_menu(&mut out)?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let choice = line.trim().parse::<u32>();
        debug!(input = %line.trim(), "Menu selection");

        match choice {
            Ok(1) => {
                write!(out, "Enter directory path: ")?;
                out.flush()?;
                let Some(path_line) = read_line(&mut input)? else {
                    break;
                };
                match tree.build(Path::new(path_line.trim())) {
                    Ok(_) => {
                        tree_built = true;
                        writeln!(out, "Merkle tree built successfully.")?;
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            Ok(2..=6) if !tree_built => {
                writeln!(out, "Build the tree first (option 1).")?;
            }
            Ok(2) => print_tree(&mut out, tree)?,
            Ok(3) => print_file_objects(&mut out, tree)?,
            Ok(4) => print_stats(&mut out, tree)?,
            Ok(5) => {
                if tree.verify() {
                    writeln!(out, "Tree integrity verified: OK")?;
                } else {
                    writeln!(out, "Tree integrity check FAILED!")?;
                }
            }
            Ok(6) => writeln!(out, "{}", tree.export_json())?,
            Ok(7) => {
                write!(out, "Enter new chunk size in bytes: ")?;
                out.flush()?;
                let Some(size_line) = read_line(&mut input)? else {
                    break;
                };
                match size_line.trim().parse::<usize>() {
                    Ok(size) => match tree.set_chunk_size(size) {
                        Ok(()) => {
                            writeln!(out, "Chunk size set to {} bytes.", tree.chunk_size())?
                        }
                        Err(e) => writeln!(out, "Error: {}", e)?,
                    },
                    Err(_) => writeln!(out, "Error: Chunk size must be an integer.")?,
                }
            }
            Ok(8) => {
                writeln!(out, "Exiting.")?;
                break;
            }
            _ => writeln!(out, "Invalid option. Try again.")?,
        }
    }

    Ok(())
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n==== Merkle Tree File System CLI ====")?;
    writeln!(out, "1. Build Merkle tree from directory")?;
    writeln!(out, "2. Print tree structure")?;
    writeln!(out, "3. Print file objects")?;
    writeln!(out, "4. Show statistics")?;
    writeln!(out, "5. Verify tree integrity")?;
    writeln!(out, "6. Export tree to JSON")?;
    writeln!(out, "7. Set chunk size")?;
    writeln!(out, "8. Exit")?;
    write!(out, "Choose an option: ")?;
    out.flush()
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Print the tree with box-drawing prefixes, children in sorted order.
fn print_tree<W: Write>(out: &mut W, tree: &MerkleTree) -> io::Result<()> {
    if let Some(root) = tree.root() {
        writeln!(out, "{}", describe(root))?;
        print_children(out, root, "")?;
    }
    Ok(())
}

fn print_children<W: Write>(out: &mut W, node: &MerkleNode, prefix: &str) -> io::Result<()> {
    if let MerkleNode::Directory(dir) = node {
        let count = dir.children.len();
        for (i, child) in dir.children.values().enumerate() {
            let last = i + 1 == count;
            let branch = if last { "└─" } else { "├─" };
            writeln!(out, "{}{} {}", prefix, branch, describe(child))?;

            let child_prefix = if last {
                format!("{}   ", prefix)
            } else {
                format!("{}│  ", prefix)
            };
            print_children(out, child, &child_prefix)?;
        }
    }
    Ok(())
}

fn describe(node: &MerkleNode) -> String {
    match node {
        MerkleNode::File(file) => {
            let hash_prefix: String = hex::encode(file.content_hash).chars().take(8).collect();
            let mut line = format!(
                "{} (File, Size: {} bytes, Hash: {}...)",
                file.name, file.size, hash_prefix
            );
            if file.chunk_hashes.len() > 1 {
                line.push_str(&format!(" [{} chunks]", file.chunk_hashes.len()));
            }
            line
        }
        MerkleNode::Directory(dir) => {
            format!("{} (Directory, Children: {})", dir.name, dir.children.len())
        }
    }
}

fn print_file_objects<W: Write>(out: &mut W, tree: &MerkleTree) -> io::Result<()> {
    writeln!(out, "\n=== File Objects ===")?;

    // Sort by content hash for stable output; byte order matches the
    // lexicographic order of the hex rendering.
    let mut entries: Vec<(&Hash, &FileRecord)> = tree.file_objects().iter().collect();
    entries.sort_by_key(|(hash, _)| **hash);

    for (hash, record) in entries {
        writeln!(out, "Content Hash: {}", hex::encode(hash))?;
        writeln!(out, "  File: {}", record.name)?;
        writeln!(out, "  Size: {} bytes", record.size)?;
        writeln!(out, "  Chunks: {}", record.chunk_hashes.len())?;

        if record.chunk_hashes.len() > 1 {
            writeln!(out, "  Chunk Hashes:")?;
            for (i, chunk) in record.chunk_hashes.iter().enumerate() {
                writeln!(out, "    [{}] {}", i, hex::encode(chunk))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_stats<W: Write>(out: &mut W, tree: &MerkleTree) -> io::Result<()> {
    let stats = tree.stats();
    writeln!(out, "Total files: {}", stats.files)?;
    writeln!(out, "Total directories: {}", stats.directories)?;
    writeln!(out, "Total size: {}", format_size(stats.total_size))?;

    if let Some(root) = tree.root() {
        writeln!(out, "Tree depth: {}", root.depth())?;
        writeln!(
            out,
            "Root hash: {}",
            root.hash().map(hex::encode).unwrap_or_default()
        )?;
    }
    Ok(())
}

/// Human-readable size: B, KB, MB, GB, one decimal below 10 with a unit.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit > 0 && size < 10.0 {
        format!("{:.1} {}", size, UNITS[unit])
    } else {
        format!("{:.0} {}", size, UNITS[unit])
    }
}
