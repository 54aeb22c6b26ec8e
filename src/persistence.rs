// File: src/persistence.rs
use crate::core::graph::WordGraph;
use crate::core::types::{NodeId, WordNode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk form of the graph: the arena and the root list.
/// The lookup indexes are derived data and are rebuilt on load.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    nodes: &'a [WordNode],
    roots: &'a [NodeId],
}

#[derive(Deserialize)]
struct Snapshot {
    nodes: Vec<WordNode>,
    roots: Vec<NodeId>,
}

/// Writes the graph atomically: a temp file next to `path` is filled and
/// then renamed over it.
pub fn save_to_disk(graph: &WordGraph, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = SnapshotRef {
        nodes: graph.nodes(),
        roots: graph.roots(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    log::info!("saved {} words to {}", graph.len(), path.display());
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<WordGraph> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    let graph = WordGraph::from_parts(snapshot.nodes, snapshot.roots)?;
    log::info!("loaded {} words from {}", graph.len(), path.display());
    Ok(graph)
}

/// Moves an unreadable snapshot to `<path>.bad` so a later save cannot
/// destroy it. Returns the new location.
pub fn quarantine(path: &Path) -> Result<PathBuf> {
    let mut name = path.as_os_str().to_owned();
    name.push(".bad");
    let target = PathBuf::from(name);
    fs::rename(path, &target)?;
    Ok(target)
}
