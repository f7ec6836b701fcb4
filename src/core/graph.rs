use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::index::{DependencyIndex, DependencyMap};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum NodeKind {
    Proxy,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphDirection {
    /// proxy -> key
    Forward,
    /// key -> proxy
    Reverse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
}

/// A reference between two nodes; `count` is how many times it was seen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub count: usize,
}

pub type MappingGraph = Graph<GraphNode, GraphEdge, Directed>;

impl GraphNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

pub struct GraphBuilder {
    graph: MappingGraph,
    node_map: HashMap<(NodeKind, String), NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Returns the existing index when a node of the same kind and name was added before.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let id = (node.kind, node.name.clone());
        if let Some(&index) = self.node_map.get(&id) {
            return index;
        }
        let index = self.graph.add_node(node);
        self.node_map.insert(id, index);
        index
    }

    /// Adds one reference, folding repeats into the existing edge's count.
    pub fn add_reference(&mut self, source: NodeIndex, target: NodeIndex) {
        match self.graph.find_edge(source, target) {
            Some(edge) => self.graph[edge].count += 1,
            None => {
                self.graph.add_edge(source, target, GraphEdge { count: 1 });
            }
        }
    }

    pub fn add_mapping(&mut self, map: &DependencyMap, from: NodeKind, to: NodeKind) {
        for (name, targets) in map {
            let source = self.add_node(GraphNode::new(name.as_str(), from));
            for target in targets {
                let target = self.add_node(GraphNode::new(target.as_str(), to));
                self.add_reference(source, target);
            }
        }
    }

    pub fn build(self) -> MappingGraph {
        self.graph
    }

    pub fn get_node_index(&self, kind: NodeKind, name: &str) -> Option<NodeIndex> {
        self.node_map.get(&(kind, name.to_string())).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Graph of one mapping. Proxies and keys with no references are kept as
/// isolated nodes.
pub fn build_graph(index: &DependencyIndex, direction: GraphDirection) -> MappingGraph {
    let mut builder = GraphBuilder::new();
    match direction {
        GraphDirection::Forward => {
            builder.add_mapping(index.forward(), NodeKind::Proxy, NodeKind::Key)
        }
        GraphDirection::Reverse => {
            builder.add_mapping(index.reverse(), NodeKind::Key, NodeKind::Proxy)
        }
    }
    builder.build()
}
