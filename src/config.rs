// File: src/config.rs
use std::env;
use std::path::PathBuf;

const DEFAULT_SYNC_FRACTION: usize = 4;

/// Runtime settings of the word service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// JSON dictionary to bulk-load at start-up, if any.
    pub dictionary_path: Option<PathBuf>,
    /// Where `save_snapshot` writes the graph.
    pub snapshot_path: PathBuf,
    /// `1 / sync_fraction` of a bulk load is inserted before returning;
    /// the remainder goes to the background worker.
    pub sync_fraction: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            snapshot_path: default_snapshot_path(),
            sync_fraction: DEFAULT_SYNC_FRACTION,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `WORDGRAPH_DICTIONARY`, `WORDGRAPH_SNAPSHOT`
    /// and `WORDGRAPH_SYNC_FRACTION`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var("WORDGRAPH_DICTIONARY") {
            config.dictionary_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = env::var("WORDGRAPH_SNAPSHOT") {
            config.snapshot_path = PathBuf::from(path);
        }
        if let Ok(raw) = env::var("WORDGRAPH_SYNC_FRACTION") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => config.sync_fraction = n,
                _ => log::warn!("ignoring invalid WORDGRAPH_SYNC_FRACTION '{}'", raw),
            }
        }
        config
    }

    /// Number of records inserted synchronously out of `total`.
    pub fn sync_count(&self, total: usize) -> usize {
        total / self.sync_fraction.max(1)
    }
}

fn default_snapshot_path() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("word-graph");
    path.push("word_graph.bin");
    path
}
