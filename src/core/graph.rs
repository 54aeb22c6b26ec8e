// --- File: src/core/graph.rs
use crate::core::types::{NodeId, WordNode, WordRecord};
use crate::error::{Result, WordGraphError};
use std::collections::{BTreeMap, HashMap};

/// Spelling length used to order the containment scan. Counted in chars so
/// multi-byte words sort the same way their visible spelling does.
fn term_len(term: &str) -> usize {
    term.chars().count()
}

/// The substring-derivation graph.
///
/// All nodes live in one arena owned by the graph; `children`/`parents` and
/// `roots` only hold [`NodeId`]s into it. `roots` plays the part of the root
/// sentinel's child list: exactly the words with no parent, sorted by term.
///
/// An edge `parent -> child` exists iff `parent.term` is a strict substring of
/// `child.term`, so every edge points from a shorter word to a longer one and
/// the graph can never contain a cycle.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    nodes: Vec<WordNode>,
    roots: Vec<NodeId>,
    term_index: HashMap<String, NodeId>,
    /// Node ids bucketed by spelling length, each bucket in insertion order.
    length_index: BTreeMap<usize, Vec<NodeId>>,
}

impl WordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a graph from its arena, e.g. after reading a snapshot.
    /// The indexes are recomputed and every invariant is verified.
    pub fn from_parts(nodes: Vec<WordNode>, roots: Vec<NodeId>) -> Result<Self> {
        let mut graph = Self {
            nodes,
            roots,
            term_index: HashMap::new(),
            length_index: BTreeMap::new(),
        };
        for (id, node) in graph.nodes.iter().enumerate() {
            if graph.term_index.insert(node.term.clone(), id).is_some() {
                return Err(WordGraphError::CorruptGraph(format!(
                    "term '{}' is stored more than once",
                    node.term
                )));
            }
            graph.length_index.entry(term_len(&node.term)).or_default().push(id);
        }
        graph.check_invariants()?;
        Ok(graph)
    }

    pub(crate) fn nodes(&self) -> &[WordNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `id` was not handed out by this graph.
    pub fn node(&self, id: NodeId) -> &WordNode {
        &self.nodes[id]
    }

    pub fn find(&self, term: &str) -> Option<NodeId> {
        self.term_index.get(term).copied()
    }

    pub fn get(&self, term: &str) -> Option<&WordNode> {
        self.find(term).map(|id| &self.nodes[id])
    }

    /// Words without any parent, sorted by term.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &WordNode)> {
        self.nodes.iter().enumerate()
    }

    pub(crate) fn lookup(&self, term: &str) -> Result<NodeId> {
        self.find(term).ok_or_else(|| WordGraphError::not_found(term))
    }

    pub fn insert_record(&mut self, record: &WordRecord) -> Result<NodeId> {
        self.insert(
            &record.term,
            &record.translation,
            record.pronunciation_us.as_deref(),
            record.pronunciation_uk.as_deref(),
        )
    }

    /// Adds a word and links it to every existing word it contains or is
    /// contained in.
    ///
    /// Duplicates are rejected before anything is touched: the graph is
    /// unchanged on every error path. Whitespace-only terms count as blank
    /// and are rejected like empty ones.
    /// Complexity: O(n) containment tests, n being the current word count.
    pub fn insert(
        &mut self,
        term: &str,
        translation: &str,
        pronunciation_us: Option<&str>,
        pronunciation_uk: Option<&str>,
    ) -> Result<NodeId> {
        if term.trim().is_empty() {
            return Err(WordGraphError::InvalidInput(format!(
                "blank term (translation '{}')",
                translation
            )));
        }
        if self.term_index.contains_key(term) {
            return Err(WordGraphError::duplicate(term, translation));
        }

        let new_id = self.nodes.len();
        self.nodes
            .push(WordNode::new(term, translation, pronunciation_us, pronunciation_uk));

        // Longest words first. Every existing word is still tested.
        let existing: Vec<NodeId> = self
            .length_index
            .values()
            .rev()
            .flatten()
            .copied()
            .collect();

        for other in existing {
            let other_term = self.nodes[other].term.as_str();
            let edge = if term.contains(other_term) {
                Some((other, new_id))
            } else if other_term.contains(term) {
                Some((new_id, other))
            } else {
                None
            };
            if let Some((parent, child)) = edge {
                self.link(parent, child);
            }
        }

        if self.nodes[new_id].parents.is_empty() {
            self.attach_root(new_id);
        }

        self.term_index.insert(term.to_string(), new_id);
        self.length_index.entry(term_len(term)).or_default().push(new_id);
        log::debug!(
            "inserted '{}' with {} parent(s), {} child(ren)",
            term,
            self.nodes[new_id].parents.len(),
            self.nodes[new_id].children.len()
        );
        Ok(new_id)
    }

    /// Position at which `id` keeps `list` sorted by term, or `None` if a
    /// node with the same term is already there.
    fn sorted_slot(&self, list: &[NodeId], id: NodeId) -> Option<usize> {
        let term = self.nodes[id].term.as_str();
        list.binary_search_by(|&other| self.nodes[other].term.as_str().cmp(term))
            .err()
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(pos) = self.sorted_slot(&self.nodes[parent].children, child) {
            self.nodes[parent].children.insert(pos, child);
        }
        if let Some(pos) = self.sorted_slot(&self.nodes[child].parents, parent) {
            self.nodes[child].parents.insert(pos, parent);
        }

        // A word that gains a parent is no longer a root.
        let child_term = self.nodes[child].term.as_str();
        let slot = self
            .roots
            .binary_search_by(|&r| self.nodes[r].term.as_str().cmp(child_term));
        if let Ok(pos) = slot {
            self.roots.remove(pos);
        }
    }

    fn attach_root(&mut self, id: NodeId) {
        if let Some(pos) = self.sorted_slot(&self.roots, id) {
            self.roots.insert(pos, id);
        }
    }

    /// Verifies the structural invariants of the arena:
    /// edge lists strictly sorted and in range, parent/child symmetry,
    /// every edge a strict containment, roots exactly the parentless nodes,
    /// and indexes in sync with the arena.
    pub fn check_invariants(&self) -> Result<()> {
        let corrupt = |msg: String| Err(WordGraphError::CorruptGraph(msg));
        let count = self.nodes.len();

        if let Some(&bad) = self.roots.iter().find(|&&r| r >= count) {
            return corrupt(format!("root id {} out of range", bad));
        }
        if !self.is_strictly_sorted(&self.roots) {
            return corrupt("roots are not strictly sorted by term".to_string());
        }

        for (id, node) in self.iter() {
            if node.term.trim().is_empty() {
                return corrupt(format!("node {} has a blank term", id));
            }
            if self.term_index.get(&node.term) != Some(&id) {
                return corrupt(format!("term index out of sync for '{}'", node.term));
            }
            for list in [&node.children, &node.parents] {
                if let Some(&bad) = list.iter().find(|&&other| other >= count) {
                    return corrupt(format!("'{}' references missing node {}", node.term, bad));
                }
                if !self.is_strictly_sorted(list) {
                    return corrupt(format!("edges of '{}' are not strictly sorted", node.term));
                }
            }
            for &child in &node.children {
                let child_node = &self.nodes[child];
                if child_node.term.len() <= node.term.len()
                    || !child_node.term.contains(node.term.as_str())
                {
                    return corrupt(format!(
                        "'{}' is not a strict substring of its child '{}'",
                        node.term, child_node.term
                    ));
                }
                if !child_node.parents.contains(&id) {
                    return corrupt(format!(
                        "'{}' lists child '{}' without the reverse edge",
                        node.term, child_node.term
                    ));
                }
            }
            for &parent in &node.parents {
                if !self.nodes[parent].children.contains(&id) {
                    return corrupt(format!(
                        "'{}' lists parent '{}' without the reverse edge",
                        node.term, self.nodes[parent].term
                    ));
                }
            }
            if node.parents.is_empty() != self.roots.contains(&id) {
                return corrupt(format!("root membership of '{}' is wrong", node.term));
            }
        }

        let indexed: usize = self.length_index.values().map(Vec::len).sum();
        if indexed != count || self.term_index.len() != count {
            return corrupt("indexes do not cover the arena".to_string());
        }
        Ok(())
    }

    fn is_strictly_sorted(&self, list: &[NodeId]) -> bool {
        list.windows(2)
            .all(|w| self.nodes[w[0]].term < self.nodes[w[1]].term)
    }
}
