// src/core/mod.rs

pub mod graph;
pub mod query;
pub mod record;
pub mod types;

pub use graph::WordGraph;
pub use query::{AncestorChain, Descendant, Relations};
pub use record::{GraphRecord, NodeRecord};
pub use types::{NodeId, WordNode, WordRecord, WordSummary};
