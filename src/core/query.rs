// src/core/query.rs
use crate::core::graph::WordGraph;
use crate::core::record::NodeRecord;
use crate::core::types::{NodeId, WordSummary};
use crate::error::{Result, WordGraphError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immediate neighbours of a word, both lists sorted by term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    pub word: WordSummary,
    pub parents: Vec<WordSummary>,
    pub children: Vec<WordSummary>,
}

/// Result of the prefix descent from the roots.
///
/// `chain` lists the prefix words walked through on the way down, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorChain {
    pub chain: Vec<WordSummary>,
    pub node: NodeRecord,
}

/// One entry of a descendant listing; direct children are at level 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descendant {
    pub level: usize,
    pub word: String,
    pub translation: String,
}

impl WordGraph {
    pub fn relations(&self, term: &str) -> Result<Relations> {
        let node = self.node(self.lookup(term)?);
        let summaries = |ids: &[NodeId]| -> Vec<WordSummary> {
            ids.iter().map(|&id| self.node(id).summary()).collect()
        };
        Ok(Relations {
            word: node.summary(),
            parents: summaries(node.parents()),
            children: summaries(node.children()),
        })
    }

    /// Depth-first descent from the roots, following only children whose
    /// term is a prefix of `term`. Children are tried in term order and the
    /// first path that reaches `term` wins.
    ///
    /// A word whose parents are not prefixes of it cannot be reached this way
    /// and is reported as not found, even though `relations` knows it.
    pub fn ancestor_chain(&self, term: &str) -> Result<AncestorChain> {
        let id = self.lookup(term)?;

        let mut path = Vec::new();
        if !self.descend(self.roots(), term, &mut path) {
            log::debug!("prefix descent does not reach '{}'", term);
            return Err(WordGraphError::not_found(term));
        }

        Ok(AncestorChain {
            chain: path.iter().map(|&step| self.node(step).summary()).collect(),
            node: self.node_record(id, true, true),
        })
    }

    fn descend(&self, level: &[NodeId], term: &str, path: &mut Vec<NodeId>) -> bool {
        for &child in level {
            let child_term = self.node(child).term();
            if child_term == term {
                return true;
            }
            if term.starts_with(child_term) {
                path.push(child);
                if self.descend(self.node(child).children(), term, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Pre-order listing of everything below `term`. A word reachable along
    /// several paths is listed once, at its first visit.
    pub fn descendants(&self, term: &str) -> Result<Vec<Descendant>> {
        let id = self.lookup(term)?;
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.collect_descendants(id, 1, &mut seen, &mut out);
        Ok(out)
    }

    fn collect_descendants(
        &self,
        id: NodeId,
        level: usize,
        seen: &mut HashSet<NodeId>,
        out: &mut Vec<Descendant>,
    ) {
        for &child in self.node(id).children() {
            if !seen.insert(child) {
                continue;
            }
            let node = self.node(child);
            out.push(Descendant {
                level,
                word: node.term().to_string(),
                translation: node.translation().to_string(),
            });
            self.collect_descendants(child, level + 1, seen, out);
        }
    }

    /// Indented `term - translation` outline of the graph, four spaces per
    /// level. Shared words appear under each of their parents.
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        for &root in self.roots() {
            self.outline_node(root, 0, &mut out);
        }
        out
    }

    fn outline_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        out.push_str(&format!(
            "{}{} - {}\n",
            "    ".repeat(depth),
            node.term(),
            node.translation()
        ));
        for &child in node.children() {
            self.outline_node(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(words: &[(&str, &str)]) -> WordGraph {
        let mut graph = WordGraph::new();
        for (word, translation) in words {
            graph.insert(word, translation, None, None).unwrap();
        }
        graph
    }

    fn words(summaries: &[WordSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.word.as_str()).collect()
    }

    #[test]
    fn relations_returns_sorted_neighbours() {
        let graph = graph_of(&[("pose", "p"), ("compose", "c"), ("pos", "x"), ("poser", "r")]);
        let rel = graph.relations("pose").unwrap();
        assert_eq!(rel.word.translation, "p");
        assert_eq!(words(&rel.parents), vec!["pos"]);
        assert_eq!(words(&rel.children), vec!["compose", "poser"]);
    }

    #[test]
    fn unknown_word_is_not_found() {
        let graph = graph_of(&[("cap", "c")]);
        assert!(matches!(graph.relations("cape"), Err(WordGraphError::NotFound(t)) if t == "cape"));
        assert!(matches!(graph.ancestor_chain("cape"), Err(WordGraphError::NotFound(_))));
        assert!(matches!(graph.descendants("cape"), Err(WordGraphError::NotFound(_))));
    }

    #[test]
    fn chain_follows_prefixes() {
        let graph = graph_of(&[("cap", "1"), ("capa", "2"), ("capable", "3"), ("able", "4")]);
        let chain = graph.ancestor_chain("capable").unwrap();
        assert_eq!(words(&chain.chain), vec!["cap", "capa"]);
        assert_eq!(chain.node.word, "capable");
    }

    #[test]
    fn chain_of_root_word_is_empty() {
        let graph = graph_of(&[("cap", "1"), ("capable", "3")]);
        let chain = graph.ancestor_chain("cap").unwrap();
        assert!(chain.chain.is_empty());
    }

    #[test]
    fn chain_takes_every_prefix_word_on_the_way() {
        let graph = graph_of(&[("a", "1"), ("ab", "2"), ("abx", "3"), ("abc", "4")]);
        let chain = graph.ancestor_chain("abc").unwrap();
        assert_eq!(words(&chain.chain), vec!["a", "ab"]);
    }

    #[test]
    fn chain_skips_non_prefix_parents() {
        let graph = graph_of(&[("b", "1"), ("bc", "2"), ("a", "3"), ("abc", "4")]);
        let rel = graph.relations("abc").unwrap();
        assert_eq!(words(&rel.parents), vec!["a", "b", "bc"]);

        let chain = graph.ancestor_chain("abc").unwrap();
        assert_eq!(words(&chain.chain), vec!["a"]);
    }

    #[test]
    fn chain_and_relations_may_disagree() {
        let graph = graph_of(&[("pos", "1"), ("compose", "2"), ("composer", "3")]);
        let rel = graph.relations("composer").unwrap();
        assert_eq!(words(&rel.parents), vec!["compose", "pos"]);

        assert!(matches!(
            graph.ancestor_chain("composer"),
            Err(WordGraphError::NotFound(t)) if t == "composer"
        ));
    }

    #[test]
    fn descendants_lists_each_word_once() {
        let graph = graph_of(&[("a", "1"), ("ab", "2"), ("abc", "3"), ("b", "4")]);
        let below: Vec<(usize, String)> = graph
            .descendants("a")
            .unwrap()
            .into_iter()
            .map(|d| (d.level, d.word))
            .collect();
        assert_eq!(below, vec![(1, "ab".to_string()), (2, "abc".to_string())]);
    }

    #[test]
    fn outline_indents_by_depth() {
        let graph = graph_of(&[("cap", "c"), ("capable", "able")]);
        assert_eq!(graph.render_outline(), "cap - c\n    capable - able\n");
    }
}
