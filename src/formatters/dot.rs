use anyhow::Result;
use petgraph::visit::EdgeRef;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{MappingGraph, NodeKind};

/// Graphviz force-directed layout engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Fdp,
    Neato,
    Sfdp,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Fdp => "fdp",
            Layout::Neato => "neato",
            Layout::Sfdp => "sfdp",
        }
    }
}

/// Renders a [`MappingGraph`] as a Graphviz `digraph`.
///
/// Proxies are boxes, keys are ellipses. Edges seen more than once carry
/// their count as a label.
pub struct DotFormatter {
    layout: Layout,
    name: String,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            layout: Layout::default(),
            name: "kvm_dependencies".to_string(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn format_to_file(&self, graph: &MappingGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(graph)?)?;
        Ok(())
    }

    pub fn format(&self, graph: &MappingGraph) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "digraph {} {{", quote(&self.name))?;
        writeln!(out, "    layout={};", self.layout.as_str())?;
        writeln!(out, "    overlap=false;")?;
        writeln!(out, "    node [fontname=\"Helvetica\"];")?;

        for idx in graph.node_indices() {
            let node = &graph[idx];
            let shape = match node.kind {
                NodeKind::Proxy => "box",
                NodeKind::Key => "ellipse",
            };
            writeln!(
                out,
                "    n{} [label={}, shape={}];",
                idx.index(),
                quote(&node.name),
                shape
            )?;
        }

        for edge in graph.edge_references() {
            let (source, target) = (edge.source().index(), edge.target().index());
            let count = edge.weight().count;
            if count > 1 {
                writeln!(out, "    n{source} -> n{target} [label=\"{count}\"];")?;
            } else {
                writeln!(out, "    n{source} -> n{target};")?;
            }
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::quote;

    #[test]
    fn quote_escapes_dot_specials() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }
}
