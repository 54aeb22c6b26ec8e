use serde_json::Value;
use std::collections::BTreeMap;
use wordgraph_core::core::GraphRecord;
use wordgraph_core::{WordGraph, WordGraphError};

fn collect(value: &Value, out: &mut BTreeMap<String, String>) {
    if let Some(word) = value.get("word").and_then(Value::as_str) {
        let translation = value["translation"].as_str().unwrap_or_default();
        out.insert(word.to_string(), translation.to_string());
    }
    if let Some(children) = value.get("children").and_then(Value::as_array) {
        for child in children {
            collect(child, out);
        }
    }
}

#[test]
fn duplicate_keeps_first_translation() {
    let mut graph = WordGraph::new();
    graph.insert("cap", "t1", None, None).unwrap();
    let err = graph.insert("cap", "t2", None, None).unwrap_err();
    assert!(matches!(err, WordGraphError::DuplicateWord { ref term, .. } if term == "cap"));
    assert_eq!(graph.get("cap").unwrap().translation(), "t1");
    assert_eq!(graph.len(), 1);
}

#[test]
fn whole_graph_json_contains_every_word_once_per_term() {
    let words = [
        ("act", "行动"),
        ("bio", "生命"),
        ("react", "反应"),
        ("action", "行动"),
        ("biology", "生物学"),
        ("act", "duplicate"),
        ("fact", "事实"),
    ];
    let mut graph = WordGraph::new();
    for (word, translation) in words {
        let _ = graph.insert(word, translation, None, None);
    }

    let json = graph.to_pretty_json().unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("word").is_none());

    let mut seen = BTreeMap::new();
    collect(&parsed, &mut seen);
    let expected: BTreeMap<String, String> = [
        ("act", "行动"),
        ("action", "行动"),
        ("bio", "生命"),
        ("biology", "生物学"),
        ("fact", "事实"),
        ("react", "反应"),
    ]
    .into_iter()
    .map(|(w, t)| (w.to_string(), t.to_string()))
    .collect();
    assert_eq!(seen, expected);

    // Only the parentless words sit at the top level.
    let top: Vec<&str> = parsed["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["word"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["act", "bio"]);

    let record: GraphRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, graph.serialize_all());
}

#[test]
fn composer_relations_and_chain_diverge() {
    let mut graph = WordGraph::new();
    for word in ["pos", "pose", "compose", "composer", "com"] {
        graph.insert(word, word, None, None).unwrap();
    }

    let parents: Vec<String> = graph
        .relations("composer")
        .unwrap()
        .parents
        .into_iter()
        .map(|p| p.word)
        .collect();
    assert_eq!(parents, vec!["com", "compose", "pos", "pose"]);

    let chain = graph.ancestor_chain("composer").unwrap();
    let chain: Vec<String> = chain.chain.into_iter().map(|s| s.word).collect();
    assert_eq!(chain, vec!["com", "compose"]);
    assert!(chain.iter().all(|step| "composer".starts_with(step.as_str())));
}

#[test]
fn chain_is_not_found_without_prefix_path() {
    let mut graph = WordGraph::new();
    for word in ["pos", "compose", "composer"] {
        graph.insert(word, word, None, None).unwrap();
    }
    let parents: Vec<String> = graph
        .relations("composer")
        .unwrap()
        .parents
        .into_iter()
        .map(|p| p.word)
        .collect();
    assert!(parents.contains(&"compose".to_string()));
    assert!(matches!(
        graph.ancestor_chain("composer"),
        Err(WordGraphError::NotFound(t)) if t == "composer"
    ));
}

#[test]
fn later_substring_detaches_root() {
    let mut graph = WordGraph::new();
    graph.insert("capable", "能干的", None, None).unwrap();
    graph.insert("able", "能够的", None, None).unwrap();
    assert_eq!(graph.roots().len(), 1);
    assert_eq!(graph.node(graph.roots()[0]).term(), "able");

    graph.insert("cap", "帽子", None, None).unwrap();
    let roots: Vec<&str> = graph.roots().iter().map(|&r| graph.node(r).term()).collect();
    assert_eq!(roots, vec!["able", "cap"]);
    graph.check_invariants().unwrap();
}

#[test]
fn serialize_node_without_expansion_is_flat() {
    let mut graph = WordGraph::new();
    graph.insert("cap", "c", Some("kæp"), Some("kæp")).unwrap();
    graph.insert("capable", "a", None, None).unwrap();
    let record = graph.serialize_node("capable", false, false).unwrap();
    assert!(record.children.is_none());
    assert!(record.parents.is_none());
    assert!(matches!(
        graph.serialize_node("missing", true, true),
        Err(WordGraphError::NotFound(_))
    ));
}
