// src/core/record.rs
use crate::core::graph::WordGraph;
use crate::core::types::NodeId;
use crate::error::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// JSON-renderable view of one word and, optionally, its neighbourhood.
///
/// Field names are the wire format consumed by the web front end,
/// `ushone` included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub word: String,
    pub translation: String,
    pub ushone: Option<String>,
    pub ukphone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<NodeRecord>>,
}

/// The whole graph as seen from the root sentinel: only its children.
/// Unlike single-node output, absent pronunciations are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_tree"
    )]
    pub children: Vec<NodeRecord>,
}

/// Whole-graph rendering of a node: no null fields, children only.
struct TreeNode<'a>(&'a NodeRecord);

impl Serialize for TreeNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let node = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("word", &node.word)?;
        map.serialize_entry("translation", &node.translation)?;
        if let Some(us) = &node.ushone {
            map.serialize_entry("ushone", us)?;
        }
        if let Some(uk) = &node.ukphone {
            map.serialize_entry("ukphone", uk)?;
        }
        if let Some(children) = &node.children {
            map.serialize_entry("children", &TreeLevel(children))?;
        }
        map.end()
    }
}

struct TreeLevel<'a>(&'a [NodeRecord]);

impl Serialize for TreeLevel<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(TreeNode))
    }
}

fn serialize_tree<S: Serializer>(
    children: &[NodeRecord],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    TreeLevel(children).serialize(serializer)
}

impl WordGraph {
    /// Renders a node. Children are expanded downwards only and parents
    /// upwards only, so a shared node is never re-expanded back towards the
    /// side it was reached from.
    pub fn node_record(&self, id: NodeId, include_parents: bool, include_children: bool) -> NodeRecord {
        let node = self.node(id);

        let children = (include_children && !node.children().is_empty()).then(|| {
            node.children()
                .iter()
                .map(|&child| self.node_record(child, false, true))
                .collect::<Vec<_>>()
        });
        let parents = (include_parents && !node.parents().is_empty()).then(|| {
            node.parents()
                .iter()
                .map(|&parent| self.node_record(parent, true, false))
                .collect::<Vec<_>>()
        });

        NodeRecord {
            word: node.term().to_string(),
            translation: node.translation().to_string(),
            ushone: node.pronunciation_us().map(str::to_string),
            ukphone: node.pronunciation_uk().map(str::to_string),
            children,
            parents,
        }
    }

    pub fn serialize_node(
        &self,
        term: &str,
        include_parents: bool,
        include_children: bool,
    ) -> Result<NodeRecord> {
        let id = self.lookup(term)?;
        Ok(self.node_record(id, include_parents, include_children))
    }

    pub fn serialize_all(&self) -> GraphRecord {
        GraphRecord {
            children: self
                .roots()
                .iter()
                .map(|&root| self.node_record(root, false, true))
                .collect(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.serialize_all())?)
    }
}
