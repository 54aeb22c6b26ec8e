//! Property tests for the word graph.
//!
//! Invariants checked after arbitrary insertion sequences:
//! - no word is reachable from itself
//! - edge lists strictly sorted by term
//! - parent/child symmetry
//! - a word is a root iff it has no parent
//! - the edge set does not depend on insertion order

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use wordgraph_core::core::NodeId;
use wordgraph_core::{WordGraph, WordGraphError};

/// Short words over a tiny alphabet, so containment is frequent.
fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]{1,4}", 1..40)
}

fn build(words: &[String]) -> WordGraph {
    let mut graph = WordGraph::new();
    for word in words {
        match graph.insert(word, &format!("t-{}", word), None, None) {
            Ok(_) | Err(WordGraphError::DuplicateWord { .. }) => {}
            Err(e) => panic!("unexpected error for '{}': {}", word, e),
        }
    }
    graph
}

fn term_of(graph: &WordGraph, id: NodeId) -> &str {
    graph.node(id).term()
}

fn edge_set(graph: &WordGraph) -> BTreeMap<String, BTreeSet<String>> {
    graph
        .iter()
        .map(|(_, node)| {
            let children = node
                .children()
                .iter()
                .map(|&c| term_of(graph, c).to_string())
                .collect();
            (node.term().to_string(), children)
        })
        .collect()
}

fn reaches_itself(graph: &WordGraph, start: NodeId) -> bool {
    let mut stack: Vec<NodeId> = graph.node(start).children().to_vec();
    let mut seen = HashSet::new();
    while let Some(id) = stack.pop() {
        if id == start {
            return true;
        }
        if seen.insert(id) {
            stack.extend_from_slice(graph.node(id).children());
        }
    }
    false
}

proptest! {
    #[test]
    fn structural_invariants_hold(words in arb_words()) {
        let graph = build(&words);
        prop_assert!(graph.check_invariants().is_ok());

        let distinct: BTreeSet<&String> = words.iter().collect();
        prop_assert_eq!(graph.len(), distinct.len());

        for (id, node) in graph.iter() {
            prop_assert!(!reaches_itself(&graph, id));

            for list in [node.children(), node.parents()] {
                for pair in list.windows(2) {
                    prop_assert!(term_of(&graph, pair[0]) < term_of(&graph, pair[1]));
                }
            }
            for &child in node.children() {
                prop_assert!(graph.node(child).parents().contains(&id));
            }
            for &parent in node.parents() {
                prop_assert!(graph.node(parent).children().contains(&id));
            }
            prop_assert_eq!(node.parents().is_empty(), graph.roots().contains(&id));
        }
    }

    #[test]
    fn edges_are_exactly_strict_containment(words in arb_words()) {
        let graph = build(&words);
        for (_, a) in graph.iter() {
            for (_, b) in graph.iter() {
                let expected = a.term() != b.term() && b.term().contains(a.term());
                let linked = a
                    .children()
                    .iter()
                    .any(|&c| term_of(&graph, c) == b.term());
                prop_assert_eq!(expected, linked, "{} -> {}", a.term(), b.term());
            }
        }
    }

    #[test]
    fn insertion_order_does_not_change_edges(words in arb_words()) {
        let forward = build(&words);
        let mut reversed_words = words.clone();
        reversed_words.reverse();
        let reversed = build(&reversed_words);
        prop_assert_eq!(edge_set(&forward), edge_set(&reversed));
    }
}
