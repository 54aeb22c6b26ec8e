// File: src/service.rs
use crate::config::ServiceConfig;
use crate::core::{AncestorChain, Descendant, GraphRecord, NodeRecord, Relations, WordGraph, WordRecord};
use crate::error::{Result, WordGraphError};
use crate::loader::load_dictionary;
use crate::persistence::{load_from_disk, quarantine, save_to_disk};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Outcome counters of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.inserted += other.inserted;
        self.duplicates += other.duplicates;
        self.invalid += other.invalid;
    }
}

/// Thread-safe front of the word graph.
///
/// Writers take the write lock for one insertion at a time, so a background
/// bulk load publishes words one by one while queries keep being served.
/// Readers never see a half-linked node.
pub struct WordService {
    graph: Arc<RwLock<WordGraph>>,
    config: ServiceConfig,
    loaders: Mutex<Vec<JoinHandle<LoadReport>>>,
    /// Set when an unreadable snapshot could not be moved aside.
    snapshot_protected: bool,
}

impl WordService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_graph(WordGraph::new(), config)
    }

    pub fn with_graph(graph: WordGraph, config: ServiceConfig) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            config,
            loaders: Mutex::new(Vec::new()),
            snapshot_protected: false,
        }
    }

    /// Restores the graph from the configured snapshot, or starts empty if
    /// there is none. An unreadable snapshot is moved to `<path>.bad` before
    /// starting empty; if that fails, `save_snapshot` refuses to overwrite it.
    pub fn from_snapshot_or_new(config: ServiceConfig) -> Self {
        let path = config.snapshot_path.clone();
        if !path.exists() {
            return Self::with_graph(WordGraph::new(), config);
        }

        match load_from_disk(&path) {
            Ok(graph) => Self::with_graph(graph, config),
            Err(e) => {
                log::error!("could not load snapshot {}: {}", path.display(), e);
                let mut service = Self::with_graph(WordGraph::new(), config);
                match quarantine(&path) {
                    Ok(moved) => log::warn!("unreadable snapshot kept as {}", moved.display()),
                    Err(move_err) => {
                        log::error!(
                            "could not move {} aside ({}), snapshot saving disabled",
                            path.display(),
                            move_err
                        );
                        service.snapshot_protected = true;
                    }
                }
                service
            }
        }
    }

    /// Snapshot first; the configured dictionary is bulk-loaded only into an
    /// empty graph.
    pub fn start(config: ServiceConfig) -> Result<Self> {
        let service = Self::from_snapshot_or_new(config);
        let dictionary = service.config.dictionary_path.clone();
        if let Some(path) = dictionary {
            if service.word_count() == 0 {
                service.load_dictionary_file(&path)?;
            } else {
                log::info!("snapshot present, not reloading {}", path.display());
            }
        }
        Ok(service)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn word_count(&self) -> usize {
        self.graph.read().len()
    }

    pub fn insert_word(
        &self,
        term: &str,
        translation: &str,
        pronunciation_us: Option<&str>,
        pronunciation_uk: Option<&str>,
    ) -> Result<()> {
        let outcome = self
            .graph
            .write()
            .insert(term, translation, pronunciation_us, pronunciation_uk);
        match outcome {
            Ok(_) => {
                log::info!("word '{}' inserted", term);
                Ok(())
            }
            Err(e) => {
                log::error!("failed to insert '{}': {}", term, e);
                Err(e)
            }
        }
    }

    pub fn relations(&self, term: &str) -> Result<Relations> {
        self.graph.read().relations(term)
    }

    pub fn ancestor_chain(&self, term: &str) -> Result<AncestorChain> {
        self.graph.read().ancestor_chain(term)
    }

    pub fn descendants(&self, term: &str) -> Result<Vec<Descendant>> {
        self.graph.read().descendants(term)
    }

    pub fn serialize_node(
        &self,
        term: &str,
        include_parents: bool,
        include_children: bool,
    ) -> Result<NodeRecord> {
        self.graph
            .read()
            .serialize_node(term, include_parents, include_children)
    }

    pub fn serialize_all(&self) -> GraphRecord {
        self.graph.read().serialize_all()
    }

    pub fn tree_json(&self) -> Result<String> {
        self.graph.read().to_pretty_json()
    }

    pub fn outline(&self) -> String {
        self.graph.read().render_outline()
    }

    /// Runs `f` against a consistent view of the graph.
    pub fn with_graph_read<T>(&self, f: impl FnOnce(&WordGraph) -> T) -> T {
        f(&self.graph.read())
    }

    pub fn load_dictionary_file(&self, path: &Path) -> Result<LoadReport> {
        let records = load_dictionary(path)?;
        self.bulk_load(records)
    }

    /// Inserts the first share of `records` before returning and hands the
    /// rest to a background worker. The returned report covers the
    /// synchronous share only; see [`WordService::wait_for_background_load`].
    pub fn bulk_load(&self, mut records: Vec<WordRecord>) -> Result<LoadReport> {
        let sync = self.config.sync_count(records.len());
        let rest = records.split_off(sync);
        log::info!(
            "bulk load: {} word(s) now, {} in the background",
            records.len(),
            rest.len()
        );

        let report = insert_batch(&self.graph, &records);

        if !rest.is_empty() {
            let graph = Arc::clone(&self.graph);
            let handle = thread::Builder::new()
                .name("word-loader".to_string())
                .spawn(move || {
                    let report = insert_batch(&graph, &rest);
                    log::info!("background load finished: {:?}", report);
                    report
                })?;
            self.loaders.lock().push(handle);
        }
        Ok(report)
    }

    /// Blocks until every background load has finished. `None` if none was
    /// running.
    pub fn wait_for_background_load(&self) -> Result<Option<LoadReport>> {
        let handles = std::mem::take(&mut *self.loaders.lock());
        if handles.is_empty() {
            return Ok(None);
        }
        let mut total = LoadReport::default();
        for handle in handles {
            let report = handle.join().map_err(|_| WordGraphError::LoaderPanicked)?;
            total.merge(report);
        }
        Ok(Some(total))
    }

    pub fn save_snapshot(&self) -> Result<()> {
        if self.snapshot_protected {
            return Err(WordGraphError::SnapshotProtected(
                self.config.snapshot_path.clone(),
            ));
        }
        save_to_disk(&self.graph.read(), &self.config.snapshot_path)
    }
}

/// Inserts records one lock acquisition at a time. Bad rows are logged and
/// counted, never abort the batch.
fn insert_batch(graph: &RwLock<WordGraph>, records: &[WordRecord]) -> LoadReport {
    let mut report = LoadReport::default();
    for record in records {
        let outcome = graph.write().insert_record(record);
        match outcome {
            Ok(_) => report.inserted += 1,
            Err(WordGraphError::DuplicateWord { term, .. }) => {
                log::warn!("duplicate word '{}' skipped", term);
                report.duplicates += 1;
            }
            Err(e) => {
                log::warn!("record {:?} skipped: {}", record.term, e);
                report.invalid += 1;
            }
        }
    }
    report
}
