//! Ordered traversal over `(source, destination, weight)` triples.
//!
//! Nothing is cached: a [`Position`] is a pair of indices into the live node
//! order and one node's edge collection, and every step is computed from
//! the current state of the graph.

use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Where a cursor points.
///
/// A position is plain data and stays meaningful only until the next
/// structural mutation, except the one [`Graph::erase_at`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The `edge`-th outgoing edge of the `node`-th node in value order.
    Edge { node: usize, edge: usize },
    /// One past the last edge.
    End,
}

/// A borrowed edge: `(source, destination, weight)`.
pub type EdgeRef<'g, N, E> = (&'g N, &'g N, &'g E);

impl<N, E> Graph<N, E> {
    /// Cursor at the first edge, or at the end if there are no edges.
    pub fn begin(&self) -> Cursor<'_, N, E> {
        self.cursor_at(self.first_from(0))
    }

    pub fn end(&self) -> Cursor<'_, N, E> {
        self.cursor_at(Position::End)
    }

    pub fn cursor_at(&self, pos: Position) -> Cursor<'_, N, E> {
        Cursor { graph: self, pos }
    }

    /// Iterate over every edge in `(source, destination, weight)` order.
    /// Use `.rev()` for the reverse traversal.
    pub fn iter(&self) -> Edges<'_, N, E> {
        Edges {
            graph: self,
            front: self.first_from(0),
            back: self.last_before(self.order.len()).unwrap_or(Position::End),
            remaining: self.edge_count(),
        }
    }

    pub(crate) fn entry_at(&self, pos: Position) -> Option<EdgeRef<'_, N, E>> {
        let Position::Edge { node, edge } = pos else {
            return None;
        };
        let slot = self.slots.get(*self.order.get(node)?)?;
        let entry = slot.edges.get(edge)?;
        Some((&slot.value, &self.slots[entry.dst].value, &entry.weight))
    }

    fn edges_of(&self, node: usize) -> usize {
        self.slots[self.order[node]].edges.len()
    }

    /// First edge of the first non-empty node at or after `node`.
    fn first_from(&self, node: usize) -> Position {
        (node..self.order.len())
            .find(|&n| !self.slots[self.order[n]].edges.is_empty())
            .map_or(Position::End, |n| Position::Edge { node: n, edge: 0 })
    }

    /// Last edge of the last non-empty node strictly before `node`.
    fn last_before(&self, node: usize) -> Option<Position> {
        (0..node.min(self.order.len()))
            .rev()
            .find(|&n| self.edges_of(n) > 0)
            .map(|n| Position::Edge {
                node: n,
                edge: self.edges_of(n) - 1,
            })
    }

    fn step_forward(&self, pos: Position) -> Position {
        match pos {
            Position::Edge { node, edge } if node < self.order.len() => {
                if edge + 1 < self.edges_of(node) {
                    Position::Edge {
                        node,
                        edge: edge + 1,
                    }
                } else {
                    self.first_from(node + 1)
                }
            }
            _ => Position::End,
        }
    }

    /// `None` when there is nothing before `pos` or `pos` is stale.
    fn step_back(&self, pos: Position) -> Option<Position> {
        match pos {
            Position::End => self.last_before(self.order.len()),
            Position::Edge { node, edge }
                if node >= self.order.len() || edge >= self.edges_of(node) =>
            {
                None
            }
            Position::Edge { node, edge } if edge > 0 => Some(Position::Edge {
                node,
                edge: edge - 1,
            }),
            Position::Edge { node, .. } => self.last_before(node),
        }
    }
}

impl<N: Ord, E: PartialOrd> Graph<N, E> {
    /// Cursor at the edge `src -> dst` with `weight`, or at the end if absent.
    pub fn find(&self, src: &N, dst: &N, weight: &E) -> Cursor<'_, N, E> {
        let (Ok(node), Some(dst)) = (self.locate(src), self.slot_of(dst)) else {
            return self.end();
        };
        match self.slots[self.order[node]]
            .edges
            .search(&self.slots, dst, weight)
        {
            Ok(edge) => self.cursor_at(Position::Edge { node, edge }),
            Err(_) => self.end(),
        }
    }

    /// Remove the edge at `pos` and return the position of the edge that
    /// followed it.
    pub fn erase_at(&mut self, pos: Position) -> GraphResult<Position, N> {
        let (Position::Edge { node, edge }, Some(_)) = (pos, self.entry_at(pos)) else {
            return Err(GraphError::InvalidPosition { op: "erase_at" });
        };
        let src = self.order[node];
        let removed = self.slots[src].edges.remove_at(edge);
        trace!(%src, dst = %removed.dst, "erased edge at cursor");

        if edge < self.edges_of(node) {
            Ok(pos)
        } else {
            Ok(self.first_from(node + 1))
        }
    }
}

/// Read-only bidirectional cursor over a graph's edges.
///
/// Two cursors are equal when they point into the same graph at the same
/// position; all end cursors of one graph are equal.
pub struct Cursor<'g, N, E> {
    graph: &'g Graph<N, E>,
    pos: Position,
}

impl<'g, N, E> Cursor<'g, N, E> {
    /// The edge under the cursor; `None` at the end.
    pub fn get(&self) -> Option<EdgeRef<'g, N, E>> {
        self.graph.entry_at(self.pos)
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos == Position::End
    }

    /// Advance one edge; from the last edge this lands on the end.
    /// Returns false, without moving, if already at the end.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.pos = self.graph.step_forward(self.pos);
        true
    }

    /// Step back one edge; from the end this lands on the last edge.
    /// Returns false, without moving, if there is no previous edge.
    pub fn move_prev(&mut self) -> bool {
        match self.graph.step_back(self.pos) {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }
}

impl<N, E> Clone for Cursor<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for Cursor<'_, N, E> {}

impl<N, E> PartialEq for Cursor<'_, N, E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.pos == other.pos
    }
}

impl<N, E> Eq for Cursor<'_, N, E> {}

impl<N, E> fmt::Debug for Cursor<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

/// Double-ended iterator over a graph's edges, see [`Graph::iter`].
pub struct Edges<'g, N, E> {
    graph: &'g Graph<N, E>,
    front: Position,
    back: Position,
    remaining: usize,
}

impl<'g, N, E> Iterator for Edges<'g, N, E> {
    type Item = EdgeRef<'g, N, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.graph.entry_at(self.front)?;
        self.front = self.graph.step_forward(self.front);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N, E> DoubleEndedIterator for Edges<'_, N, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.graph.entry_at(self.back)?;
        self.back = self.graph.step_back(self.back).unwrap_or(Position::End);
        self.remaining -= 1;
        Some(item)
    }
}

impl<N, E> ExactSizeIterator for Edges<'_, N, E> {}

impl<N, E> FusedIterator for Edges<'_, N, E> {}

impl<N, E> Clone for Edges<'_, N, E> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'g, N, E> IntoIterator for &'g Graph<N, E> {
    type Item = EdgeRef<'g, N, E>;
    type IntoIter = Edges<'g, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Graph<&'static str, i32> {
        Graph::from_edges([("A", "B", 3), ("C", "B", 2), ("D", "B", 4)]).unwrap()
    }

    #[test]
    fn forward_cursor_walks_in_order() {
        let graph = abcd();
        let mut cursor = graph.begin();
        assert_eq!(cursor.get(), Some((&"A", &"B", &3)));
        assert!(cursor.move_next());
        assert_eq!(cursor.get(), Some((&"C", &"B", &2)));
        assert!(cursor.move_next());
        assert!(cursor.move_next());
        assert!(cursor.is_end());
        assert_eq!(cursor, graph.end());
        assert!(!cursor.move_next());
        assert!(cursor.is_end());
    }

    #[test]
    fn stale_positions_do_not_step_back() {
        let graph = abcd();
        let mut past_nodes = graph.cursor_at(Position::Edge { node: 9, edge: 2 });
        assert!(!past_nodes.move_prev());
        assert_eq!(past_nodes.position(), Position::Edge { node: 9, edge: 2 });

        let mut past_edges = graph.cursor_at(Position::Edge { node: 0, edge: 5 });
        assert!(!past_edges.move_prev());
        assert!(past_edges.get().is_none());
    }

    #[test]
    fn find_with_nan_weight_is_end() {
        let graph = Graph::from_edges([("A", "B", 3.0), ("A", "B", 5.0)]).unwrap();
        assert!(graph.find(&"A", &"B", &f64::NAN).is_end());
        assert_eq!(
            graph.find(&"A", &"B", &5.0).get(),
            Some((&"A", &"B", &5.0))
        );
    }

    #[test]
    fn backward_from_end_lands_on_last_edge() {
        let graph = abcd();
        let mut cursor = graph.end();
        assert!(cursor.move_prev());
        assert_eq!(cursor.get(), Some((&"D", &"B", &4)));
        assert!(cursor.move_prev());
        assert!(cursor.move_prev());
        assert_eq!(cursor, graph.begin());
        assert!(!cursor.move_prev());
        assert_eq!(cursor, graph.begin());
    }

    #[test]
    fn empty_graph_begin_is_end() {
        let graph: Graph<u8, u8> = Graph::from_nodes([1, 2, 3]);
        assert_eq!(graph.begin(), graph.end());
        let mut cursor = graph.end();
        assert!(!cursor.move_prev());
        assert_eq!(graph.iter().count(), 0);
        assert_eq!(graph.iter().next_back(), None);
    }

    #[test]
    fn cursors_of_different_graphs_differ() {
        let a = abcd();
        let b = abcd();
        assert_ne!(a.end(), b.end());
        assert_eq!(a.end(), a.end());
    }

    #[test]
    fn iter_skips_nodes_without_edges() {
        let graph = Graph::from_edges([("a", "z", 1), ("m", "a", 2), ("m", "a", 1)]).unwrap();
        let forward: Vec<_> = graph.iter().map(|(s, d, w)| (*s, *d, *w)).collect();
        assert_eq!(forward, [("a", "z", 1), ("m", "a", 1), ("m", "a", 2)]);

        let backward: Vec<_> = graph.iter().rev().map(|(s, d, w)| (*s, *d, *w)).collect();
        assert_eq!(backward, [("m", "a", 2), ("m", "a", 1), ("a", "z", 1)]);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let graph = abcd();
        let mut it = graph.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some((&"A", &"B", &3)));
        assert_eq!(it.next_back(), Some((&"D", &"B", &4)));
        assert_eq!(it.next(), Some((&"C", &"B", &2)));
        assert_eq!(it.next_back(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn find_and_erase_at() {
        let mut graph = abcd();
        let found = graph.find(&"C", &"B", &2);
        assert_eq!(found.get(), Some((&"C", &"B", &2)));

        let pos = graph.find(&"A", &"B", &3).position();
        let next = graph.erase_at(pos).unwrap();
        assert_eq!(graph.cursor_at(next).get(), Some((&"C", &"B", &2)));
        assert!(graph.find(&"A", &"B", &3).is_end());
        assert!(graph.find(&"Q", &"B", &3).is_end());
        assert!(graph.find(&"A", &"Q", &3).is_end());
    }

    #[test]
    fn erase_at_within_a_node_keeps_position() {
        let mut graph = Graph::from_edges([("a", "b", 1), ("a", "b", 2), ("a", "c", 0)]).unwrap();
        let next = graph.erase_at(graph.begin().position()).unwrap();
        assert_eq!(graph.cursor_at(next).get(), Some((&"a", &"b", &2)));

        let last = graph.find(&"a", &"c", &0).position();
        assert_eq!(graph.erase_at(last).unwrap(), Position::End);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn erase_at_rejects_end_and_stale_positions() {
        let mut graph = abcd();
        assert_eq!(
            graph.erase_at(Position::End),
            Err(GraphError::InvalidPosition { op: "erase_at" })
        );
        assert!(graph.erase_at(Position::Edge { node: 1, edge: 0 }).is_err());
        assert!(graph.erase_at(Position::Edge { node: 9, edge: 0 }).is_err());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn graph_ref_into_iterator() {
        let graph = abcd();
        let mut weights = Vec::new();
        for (_, _, w) in &graph {
            weights.push(*w);
        }
        assert_eq!(weights, [3, 2, 4]);
    }
}
