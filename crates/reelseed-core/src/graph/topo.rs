use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::error::{Result, SeedError};
use crate::graph::dag::DependencyGraph;
use crate::seed::Section;

/// Order sections so every parent precedes its children.
///
/// Kahn's algorithm with the ready set kept in a min-heap on node index: among
/// sections whose parents are all placed, the earliest declared goes next. An
/// already valid declaration order is therefore returned unchanged.
///
/// Cycles are detected up front with petgraph's `toposort`, whose error names
/// one section on the cycle.
pub fn insertion_order(graph: &DependencyGraph) -> Result<Vec<Section>> {
    if let Err(cycle) = toposort(&graph.graph, None) {
        let section = graph.section(cycle.node_id());
        return Err(SeedError::CircularDependency {
            sections: section.table().to_string(),
        });
    }

    let n = graph.section_count();
    // Edges run child → parent, so a node's outgoing edges are its unmet parents.
    let mut pending: Vec<usize> = graph
        .graph
        .node_indices()
        .map(|idx| graph.graph.edges_directed(idx, Direction::Outgoing).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|(_, &count)| count == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(i)) = ready.pop() {
        let idx = NodeIndex::new(i);
        order.push(graph.section(idx));
        for child in graph.graph.neighbors_directed(idx, Direction::Incoming) {
            let slot = &mut pending[child.index()];
            *slot -= 1;
            if *slot == 0 {
                ready.push(Reverse(child.index()));
            }
        }
    }

    debug_assert_eq!(order.len(), n);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_is_kept() {
        let graph = DependencyGraph::from_sections(&Section::ALL);
        let order = insertion_order(&graph).unwrap();
        assert_eq!(order, Section::ALL.to_vec());
    }

    #[test]
    fn test_parents_are_moved_ahead() {
        let sections = [
            Section::WatchComments,
            Section::Watches,
            Section::Releases,
            Section::Users,
            Section::Countries,
            Section::Events,
        ];
        let graph = DependencyGraph::from_sections(&sections);
        let order = insertion_order(&graph).unwrap();

        let pos = |s: Section| order.iter().position(|&o| o == s).unwrap();
        assert!(pos(Section::Users) < pos(Section::Watches));
        assert!(pos(Section::Watches) < pos(Section::WatchComments));
        assert!(pos(Section::Events) < pos(Section::Releases));
        assert!(pos(Section::Countries) < pos(Section::Releases));
        assert_eq!(order.len(), sections.len());
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut graph = DependencyGraph::from_sections(&[Section::Users, Section::UserFollows]);
        let users = graph.node_index(Section::Users).unwrap();
        let follows = graph.node_index(Section::UserFollows).unwrap();
        graph.graph.add_edge(users, follows, ());

        let err = insertion_order(&graph).unwrap_err();
        match err {
            SeedError::CircularDependency { sections } => {
                assert!(
                    sections == "users" || sections == "user_follows",
                    "unexpected cycle node: {}",
                    sections
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
