//! Core graph data structures.

use std::fmt;

use dg_core::SlotId;

use crate::arena::SlotArena;
use crate::edges::EdgeSet;
use crate::error::{GraphError, GraphResult};

/// A node's storage slot: the node value plus its outgoing edges.
#[derive(Debug, Clone)]
pub(crate) struct NodeSlot<N, E> {
    pub(crate) value: N,
    pub(crate) edges: EdgeSet<E>,
}

impl<N, E> NodeSlot<N, E> {
    pub(crate) fn new(value: N) -> Self {
        Self {
            value,
            edges: EdgeSet::default(),
        }
    }
}

pub(crate) type Slots<N, E> = SlotArena<NodeSlot<N, E>>;

/// A directed graph with unique, ordered node values and weighted edges.
///
/// The graph stores:
/// - Every node value exactly once, in an arena slot addressed by a stable handle.
/// - The occupied slots sorted by node value (the node order).
/// - For each node, its outgoing `(destination, weight)` entries sorted by
///   destination value then weight. Destinations are handles, never copies.
///
/// Parallel edges are allowed as long as their weights differ. Iteration
/// yields `(source, destination, weight)` in lexicographic order.
#[derive(Clone)]
pub struct Graph<N, E> {
    pub(crate) slots: Slots<N, E>,

    /// Occupied slots, ascending by node value.
    pub(crate) order: Vec<SlotId>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            slots: SlotArena::default(),
            order: Vec::new(),
        }
    }
}

impl<N, E> Graph<N, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` node slots.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            slots: SlotArena::with_capacity(nodes),
            order: Vec::with_capacity(nodes),
        }
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.order.iter().map(|&id| self.slots[id].edges.len()).sum()
    }

    /// True when the graph has no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        let nodes = self.order.len();
        self.slots.clear();
        self.order.clear();
        tracing::debug!(nodes, "cleared graph");
    }
}

impl<N: Ord, E: PartialOrd> Graph<N, E> {
    /// Create a graph holding `nodes` and no edges. Repeated values collapse.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let nodes = nodes.into_iter();
        let mut graph = Self::with_capacity(nodes.size_hint().0);
        for value in nodes {
            graph.insert_node(value);
        }
        graph
    }

    /// Create a graph from `(source, destination, weight)` triples.
    ///
    /// Every endpoint mentioned becomes a node. Fails if a weight is not
    /// comparable with itself.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N, E)>) -> GraphResult<Self, N> {
        let mut graph = Self::new();
        for (src, dst, weight) in edges {
            let src = graph.entry_slot(src);
            let dst = graph.entry_slot(dst);
            graph.link(src, dst, weight)?;
        }
        Ok(graph)
    }

    /// Position of `value` in the node order, or where it would be inserted.
    pub(crate) fn locate(&self, value: &N) -> Result<usize, usize> {
        self.order
            .binary_search_by(|&id| self.slots[id].value.cmp(value))
    }

    pub(crate) fn slot_of(&self, value: &N) -> Option<SlotId> {
        self.locate(value).ok().map(|pos| self.order[pos])
    }

    pub fn is_node(&self, value: &N) -> bool {
        self.locate(value).is_ok()
    }

    /// True iff at least one edge `src -> dst` exists, whatever its weight.
    pub fn is_connected(&self, src: &N, dst: &N) -> bool {
        match (self.slot_of(src), self.slot_of(dst)) {
            (Some(s), Some(d)) => !self.slots[s].edges.span_to(&self.slots, d).is_empty(),
            _ => false,
        }
    }

    /// All node values, ascending.
    pub fn nodes(&self) -> Vec<N>
    where
        N: Clone,
    {
        self.order
            .iter()
            .map(|&id| self.slots[id].value.clone())
            .collect()
    }

    /// Distinct direct successors of `src`, ascending.
    pub fn connected(&self, src: &N) -> GraphResult<Vec<N>, N>
    where
        N: Clone,
    {
        let id = self
            .slot_of(src)
            .ok_or_else(|| GraphError::missing("connected", src))?;
        let mut out = Vec::new();
        let mut last = None;
        for entry in self.slots[id].edges.iter() {
            if last != Some(entry.dst) {
                out.push(self.slots[entry.dst].value.clone());
                last = Some(entry.dst);
            }
        }
        Ok(out)
    }

    /// Weights of every `src -> dst` edge, ascending. Empty when there is no
    /// such edge, including when either node is absent.
    pub fn weights(&self, src: &N, dst: &N) -> Vec<E>
    where
        E: Clone,
    {
        match (self.slot_of(src), self.slot_of(dst)) {
            (Some(s), Some(d)) => self.slots[s]
                .edges
                .span_to(&self.slots, d)
                .iter()
                .map(|e| e.weight.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Structural equality: node orders and edge collections are walked in
/// lockstep and compared by value; the first difference decides.
impl<N: PartialEq, E: PartialEq> PartialEq for Graph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        if self.order.len() != other.order.len() {
            return false;
        }
        self.order.iter().zip(&other.order).all(|(&a, &b)| {
            let (lhs, rhs) = (&self.slots[a], &other.slots[b]);
            lhs.value == rhs.value
                && lhs.edges.len() == rhs.edges.len()
                && lhs.edges.iter().zip(rhs.edges.iter()).all(|(x, y)| {
                    self.slots[x.dst].value == other.slots[y.dst].value && x.weight == y.weight
                })
        })
    }
}

impl<N: Eq, E: Eq> Eq for Graph<N, E> {}

/// Lists each node in order, followed by its outgoing `destination | weight`
/// pairs:
///
/// ```text
/// A (
///     B | 3
/// )
/// ```
impl<N: fmt::Display, E: fmt::Display> fmt::Display for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &id in &self.order {
            let slot = &self.slots[id];
            writeln!(f, "{} (", slot.value)?;
            for entry in slot.edges.iter() {
                writeln!(f, "\t{} | {}", self.slots[entry.dst].value, entry.weight)?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.order.iter().map(|&id| {
                let slot = &self.slots[id];
                let edges: Vec<_> = slot
                    .edges
                    .iter()
                    .map(|e| (&self.slots[e.dst].value, &e.weight))
                    .collect();
                (&slot.value, edges)
            }))
            .finish()
    }
}
