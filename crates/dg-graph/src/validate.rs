//! Graph invariant validation.

use dg_core::{CoreError, CoreResult, ensure_comparable};

use crate::error::GraphResult;
use crate::graph::Graph;

impl<N: Ord, E: PartialOrd> Graph<N, E> {
    /// Re-check every structural invariant, returning the first violation.
    ///
    /// A graph only ever mutated through its public API always passes.
    pub fn validate(&self) -> GraphResult<(), N> {
        validate_nodes(self)?;
        validate_edges(self)?;
        Ok(())
    }
}

/// Node order and slot arena agree, and values are strictly ascending.
pub(crate) fn validate_nodes<N: Ord, E>(graph: &Graph<N, E>) -> CoreResult<()> {
    if graph.order.len() != graph.slots.len() {
        return Err(CoreError::Invariant {
            what: "node order and slot arena disagree on node count",
        });
    }

    // Every ordered handle must resolve
    if graph.order.iter().any(|&id| !graph.slots.contains(id)) {
        return Err(CoreError::Invariant {
            what: "node order refers to a vacant slot",
        });
    }

    // Strictly ascending also means pairwise distinct
    let ascending = graph
        .order
        .windows(2)
        .all(|w| graph.slots[w[0]].value < graph.slots[w[1]].value);
    if !ascending {
        return Err(CoreError::Invariant {
            what: "node values are not strictly ascending",
        });
    }

    Ok(())
}

/// Every edge resolves to a live node, weights are admissible, and each
/// collection is strictly ordered by (destination, weight).
pub(crate) fn validate_edges<N: Ord, E: PartialOrd>(graph: &Graph<N, E>) -> CoreResult<()> {
    for &id in &graph.order {
        let edges = &graph.slots[id].edges;

        if edges.iter().any(|e| !graph.slots.contains(e.dst)) {
            return Err(CoreError::Invariant {
                what: "edge refers to a vacant slot",
            });
        }

        for entry in edges.iter() {
            ensure_comparable(&entry.weight, "stored edge weight")?;
        }

        if !edges.is_strictly_ordered(&graph.slots) {
            return Err(CoreError::Invariant {
                what: "edge collection is not strictly ordered by (destination, weight)",
            });
        }
    }

    Ok(())
}
