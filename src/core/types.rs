// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Index of a word inside the graph arena.
/// Edges between words are stored as `NodeId`s, never as owned nodes.
pub type NodeId = usize;

/// One vocabulary entry and its containment edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordNode {
    pub(crate) term: String,
    pub(crate) translation: String,
    pub(crate) pronunciation_us: Option<String>,
    pub(crate) pronunciation_uk: Option<String>,
    /// Words containing this one, sorted by term.
    pub(crate) children: Vec<NodeId>,
    /// Words contained in this one, sorted by term.
    pub(crate) parents: Vec<NodeId>,
}

impl WordNode {
    pub(crate) fn new(
        term: &str,
        translation: &str,
        pronunciation_us: Option<&str>,
        pronunciation_uk: Option<&str>,
    ) -> Self {
        Self {
            term: term.to_string(),
            translation: translation.to_string(),
            pronunciation_us: pronunciation_us.map(str::to_string),
            pronunciation_uk: pronunciation_uk.map(str::to_string),
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn pronunciation_us(&self) -> Option<&str> {
        self.pronunciation_us.as_deref()
    }

    pub fn pronunciation_uk(&self) -> Option<&str> {
        self.pronunciation_uk.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn summary(&self) -> WordSummary {
        WordSummary {
            word: self.term.clone(),
            translation: self.translation.clone(),
        }
    }
}

/// A single row to insert, as supplied by callers and the dictionary loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub term: String,
    pub translation: String,
    pub pronunciation_us: Option<String>,
    pub pronunciation_uk: Option<String>,
}

impl WordRecord {
    pub fn new(term: &str, translation: &str) -> Self {
        Self {
            term: term.to_string(),
            translation: translation.to_string(),
            pronunciation_us: None,
            pronunciation_uk: None,
        }
    }
}

/// `{word, translation}` pair returned by the relation and chain queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSummary {
    pub word: String,
    pub translation: String,
}
