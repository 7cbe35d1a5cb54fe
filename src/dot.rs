//! Graphviz export for [`Diagram`]s.

use std::fmt;
use std::fmt::Write;

use itertools::Itertools;
use strum::VariantArray;

use crate::diagram::{Branch, Child, Diagram};
use crate::Vertex;

impl<N: Vertex> Diagram<N> {
    /// Render this diagram in the DOT language.
    ///
    /// Decision nodes are labelled with their edge and grouped one rank per level.
    /// The sinks are drawn as squares, exclude arcs dashed and include arcs solid.
    pub fn to_dot(&self) -> Result<String, fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph Diagram {{")?;
        writeln!(dot, "  rankdir=TB;")?;
        writeln!(dot, "  node [shape=circle];")?;
        writeln!(dot)?;

        writeln!(dot, "  // Sinks")?;
        writeln!(dot, "  reject [label=\"⊥\", shape=square];")?;
        writeln!(dot, "  accept [label=\"⊤\", shape=square];")?;
        writeln!(dot, "  root [shape=none];")?;
        writeln!(dot, "  root -> {};", target(self.root()))?;

        let by_level = self.nodes().into_group_map_by(|(_, node)| node.level());
        for level in by_level.keys().copied().sorted() {
            writeln!(dot)?;
            writeln!(dot, "  // Level {}", level)?;
            writeln!(dot, "  {{ rank=same;")?;
            for (id, node) in &by_level[&level] {
                let label = format!("{:?}", node.edge()).replace('\\', "\\\\").replace('"', "\\\"");
                writeln!(dot, "    n{} [label=\"{}\"];", id, label)?;
            }
            writeln!(dot, "  }}")?;
        }

        writeln!(dot)?;
        writeln!(dot, "  // Arcs")?;
        for (id, node) in self.nodes() {
            for branch in Branch::VARIANTS {
                match branch {
                    Branch::Exclude => writeln!(dot, "  n{} -> {} [style=dashed];", id, target(node.child(*branch)))?,
                    Branch::Include => writeln!(dot, "  n{} -> {};", id, target(node.child(*branch)))?,
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

fn target(child: Child) -> String {
    match child {
        Child::Reject => "reject".to_string(),
        Child::Accept => "accept".to_string(),
        Child::Node(id) => format!("n{}", id),
    }
}
