// File: src/error.rs

/// Result type used across the crate, defaulting to [`WordGraphError`].
pub type Result<T, E = WordGraphError> = std::result::Result<T, E>;

/// Every failure the word graph and its service layer can report.
///
/// All of them are per-operation: the graph is left exactly as it was
/// before the failing call.
#[derive(Debug, thiserror::Error)]
pub enum WordGraphError {
    /// The term is already present; the insertion was a no-op.
    #[error("word '{term}' already exists (rejected translation: '{translation}')")]
    DuplicateWord { term: String, translation: String },

    /// The term is empty or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No node carries this term.
    #[error("word '{0}' not found")]
    NotFound(String),

    /// The arena violates a structural invariant, e.g. after loading a
    /// hand-edited snapshot.
    #[error("corrupt word graph: {0}")]
    CorruptGraph(String),

    /// The snapshot on disk could not be read nor moved aside, so writing
    /// over it is refused.
    #[error("refusing to overwrite unreadable snapshot {0}")]
    SnapshotProtected(std::path::PathBuf),

    /// The background bulk-load worker panicked.
    #[error("background loader thread panicked")]
    LoaderPanicked,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WordGraphError {
    pub(crate) fn duplicate(term: &str, translation: &str) -> Self {
        Self::DuplicateWord {
            term: term.to_string(),
            translation: translation.to_string(),
        }
    }

    pub(crate) fn not_found(term: &str) -> Self {
        Self::NotFound(term.to_string())
    }
}
