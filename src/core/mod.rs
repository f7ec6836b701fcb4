pub mod analyzer;
pub mod graph;
pub mod index;
pub mod keys;
pub mod scanner;

pub use analyzer::DependencyAnalyzer;
pub use graph::{build_graph, GraphDirection, GraphEdge, GraphNode, MappingGraph, NodeKind};
pub use index::{DependencyIndex, DependencyMap, IndexBuilder, ScanStats};
pub use keys::KeyList;
pub use scanner::{FileContent, ProxyDir, ProxyScanner, ProxyWalk, ScanEvent, ScannedFile};
