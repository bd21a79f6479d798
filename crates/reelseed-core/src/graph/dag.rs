use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::seed::Section;

/// A directed graph of section dependencies.
/// Edges point from dependent section to referenced section (child → parent).
pub struct DependencyGraph {
    pub graph: DiGraph<Section, ()>,
    pub node_indices: HashMap<Section, NodeIndex>,
}

impl DependencyGraph {
    /// Build a graph over the given sections. Nodes are added in slice order,
    /// so node indices follow declaration order. Dependencies on sections
    /// outside the slice are ignored.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for &section in sections {
            if node_indices.contains_key(&section) {
                continue;
            }
            let idx = graph.add_node(section);
            node_indices.insert(section, idx);
        }

        for &section in sections {
            for parent in section.depends_on() {
                if let (Some(&from_idx), Some(&to_idx)) =
                    (node_indices.get(&section), node_indices.get(parent))
                {
                    graph.update_edge(from_idx, to_idx, ());
                }
            }
        }

        Self {
            graph,
            node_indices,
        }
    }

    pub fn section(&self, idx: NodeIndex) -> Section {
        self.graph[idx]
    }

    pub fn node_index(&self, section: Section) -> Option<NodeIndex> {
        self.node_indices.get(&section).copied()
    }

    pub fn section_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_full_graph() {
        let graph = DependencyGraph::from_sections(&Section::ALL);
        assert_eq!(graph.section_count(), 16);
        let expected: usize = Section::ALL.iter().map(|s| s.depends_on().len()).sum();
        assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn test_missing_parents_are_ignored() {
        let graph = DependencyGraph::from_sections(&[Section::UserFollows, Section::Tags]);
        assert_eq!(graph.section_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node_index(Section::Users).is_none());
    }
}
