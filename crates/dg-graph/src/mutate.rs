//! Structural mutation: node/edge insertion and deletion, rename, merge.
//!
//! Every operation checks its preconditions before touching the graph, so a
//! call that returns an error leaves it unmodified.

use dg_core::{CoreResult, SlotId, ensure_comparable};
use tracing::{debug, trace};

use crate::edges::EdgeSet;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeSlot, Slots};

impl<N: Ord, E: PartialOrd> Graph<N, E> {
    /// Add a node; false if the value is already present.
    pub fn insert_node(&mut self, value: N) -> bool {
        match self.locate(&value) {
            Ok(_) => false,
            Err(pos) => {
                let id = self.slots.insert(NodeSlot::new(value));
                self.order.insert(pos, id);
                trace!(slot = %id, "inserted node");
                true
            }
        }
    }

    /// Add the edge `src -> dst` with `weight`; false if that exact triple
    /// already exists.
    ///
    /// Both endpoints must already be nodes.
    pub fn insert_edge(&mut self, src: &N, dst: &N, weight: E) -> GraphResult<bool, N>
    where
        N: Clone,
    {
        let (src, dst) = self.endpoints("insert_edge", src, dst)?;
        Ok(self.link(src, dst, weight)?)
    }

    /// Remove a node and every edge that starts or ends at it.
    pub fn delete_node(&mut self, value: &N) -> bool {
        let Ok(pos) = self.locate(value) else {
            return false;
        };
        let id = self.order.remove(pos);
        let outgoing = self.slots.remove(id).map_or(0, |slot| slot.edges.len());
        let mut incoming = 0;
        for &other in &self.order {
            incoming += self.slots[other].edges.remove_dst(id);
        }
        debug!(slot = %id, outgoing, incoming, "deleted node");
        true
    }

    /// Remove exactly the edge `src -> dst` with `weight`, if present.
    pub fn erase_edge(&mut self, src: &N, dst: &N, weight: &E) -> bool {
        let (Some(src), Some(dst)) = (self.slot_of(src), self.slot_of(dst)) else {
            return false;
        };
        let removed = self.with_edges(src, |edges, slots| edges.remove(slots, dst, weight));
        if removed {
            trace!(%src, %dst, "erased edge");
        }
        removed
    }

    /// Rename `old` to `new` in place; every edge touching the node follows.
    ///
    /// Returns `Ok(false)` without changing anything when `new` already names
    /// a different node. Renaming a node to its own value is a successful
    /// no-op. Never merges: see [`Graph::merge_replace`].
    pub fn replace(&mut self, old: &N, new: N) -> GraphResult<bool, N>
    where
        N: Clone,
    {
        let Ok(old_pos) = self.locate(old) else {
            return Err(GraphError::missing("replace", old));
        };
        if let Ok(pos) = self.locate(&new) {
            return Ok(pos == old_pos);
        }

        let id = self.order.remove(old_pos);
        self.slots[id].value = new;
        let (Ok(pos) | Err(pos)) = self.locate(&self.slots[id].value);
        self.order.insert(pos, id);
        self.redirect(id, id);
        debug!(slot = %id, "replaced node value");
        Ok(true)
    }

    /// Fold `old` into `new`: every edge from or to `old` is moved onto
    /// `new` (an `old -> old` loop becomes `new -> new`), exact duplicates
    /// are dropped, and `old` is removed.
    ///
    /// Both nodes must exist. Merging a node into itself does nothing.
    pub fn merge_replace(&mut self, old: &N, new: &N) -> GraphResult<(), N>
    where
        N: Clone,
    {
        let (old_id, new_id) = self.endpoints("merge_replace", old, new)?;
        if old_id == new_id {
            return Ok(());
        }

        let mut dropped = self.redirect(old_id, new_id);
        let absorbed = std::mem::take(&mut self.slots[old_id].edges);
        let moved = absorbed.len();
        dropped += self.with_edges(new_id, |edges, slots| {
            edges.absorb(absorbed);
            edges.normalize(slots)
        });

        if let Ok(pos) = self.locate(old) {
            self.order.remove(pos);
        }
        self.slots.remove(old_id);
        debug!(from = %old_id, into = %new_id, moved, dropped, "merged node");
        Ok(())
    }

    /// Slot for `value`, inserting it first if needed.
    pub(crate) fn entry_slot(&mut self, value: N) -> SlotId {
        match self.locate(&value) {
            Ok(pos) => self.order[pos],
            Err(pos) => {
                let id = self.slots.insert(NodeSlot::new(value));
                self.order.insert(pos, id);
                id
            }
        }
    }

    /// Add `(dst, weight)` to `src`'s edges. Both handles must be live.
    pub(crate) fn link(&mut self, src: SlotId, dst: SlotId, weight: E) -> CoreResult<bool> {
        ensure_comparable(&weight, "edge weight")?;
        let inserted = self.with_edges(src, |edges, slots| edges.insert(slots, dst, weight));
        if inserted {
            trace!(%src, %dst, "inserted edge");
        }
        Ok(inserted)
    }

    /// Resolve both nodes or report the first one missing.
    fn endpoints(&self, op: &'static str, a: &N, b: &N) -> GraphResult<(SlotId, SlotId), N>
    where
        N: Clone,
    {
        let a_id = self.slot_of(a).ok_or_else(|| GraphError::missing(op, a))?;
        let b_id = self.slot_of(b).ok_or_else(|| GraphError::missing(op, b))?;
        Ok((a_id, b_id))
    }

    /// Point every edge aimed at `from` at `to` instead, re-sorting and
    /// dropping exact duplicates in each touched collection. With
    /// `from == to` this only re-sorts, which is what a rename needs.
    ///
    /// Returns how many duplicate edges were dropped.
    fn redirect(&mut self, from: SlotId, to: SlotId) -> usize {
        let mut dropped = 0;
        for i in 0..self.order.len() {
            let id = self.order[i];
            if !self.slots[id].edges.references(from) {
                continue;
            }
            dropped += self.with_edges(id, |edges, slots| {
                edges.retarget(from, to);
                edges.normalize(slots)
            });
        }
        dropped
    }

    /// Run `f` on `id`'s edge collection while the rest of the arena stays
    /// readable for value lookups.
    pub(crate) fn with_edges<R>(
        &mut self,
        id: SlotId,
        f: impl FnOnce(&mut EdgeSet<E>, &Slots<N, E>) -> R,
    ) -> R {
        let mut edges = std::mem::take(&mut self.slots[id].edges);
        let out = f(&mut edges, &self.slots);
        self.slots[id].edges = edges;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Graph<&'static str, i32> {
        Graph::from_edges([("A", "B", 3), ("C", "B", 2), ("D", "B", 4)]).unwrap()
    }

    #[test]
    fn insert_node_is_idempotent() {
        let mut graph: Graph<String, f64> = Graph::new();
        assert!(graph.insert_node("Namaste".to_string()));
        assert!(!graph.insert_node("Namaste".to_string()));
        assert_eq!(graph.nodes(), ["Namaste"]);
    }

    #[test]
    fn insert_edge_rejects_duplicates_and_missing_nodes() {
        let mut graph = Graph::from_edges([("Hello", "how", 5.4), ("how", "are", 7.6)]).unwrap();
        assert_eq!(graph.insert_edge(&"Hello", &"are", 2.3), Ok(true));
        assert_eq!(graph.insert_edge(&"Hello", &"are", 2.3), Ok(false));
        assert_eq!(graph.insert_edge(&"Hello", &"are", 1.0), Ok(true));
        assert_eq!(graph.weights(&"Hello", &"are"), [1.0, 2.3]);

        let before = graph.clone();
        let err = graph.insert_edge(&"Taco", &"Hello", 4.8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot call Graph::insert_edge on a node that does not exist: \"Taco\""
        );
        assert!(graph.insert_edge(&"Hello", &"Que", 4.2).is_err());
        assert!(graph.insert_edge(&"Hello", &"how", f64::NAN).is_err());
        assert_eq!(graph, before);
    }

    #[test]
    fn self_loops_are_ordinary_edges() {
        let mut graph: Graph<u32, u32> = Graph::from_nodes([1, 2]);
        assert_eq!(graph.insert_edge(&1, &1, 0), Ok(true));
        assert!(graph.is_connected(&1, &1));
        assert!(graph.delete_node(&1));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn delete_node_cascades_both_directions() {
        let mut graph = abcd();
        assert!(graph.delete_node(&"B"));
        assert!(!graph.delete_node(&"B"));
        assert_eq!(graph.nodes(), ["A", "C", "D"]);
        assert_eq!(graph.edge_count(), 0);

        let mut graph = Graph::from_edges([("Hello", "how", 5.4), ("how", "are", 7.6)]).unwrap();
        assert!(graph.delete_node(&"Hello"));
        assert_eq!(graph.nodes(), ["are", "how"]);
        assert!(graph.is_connected(&"how", &"are"));
    }

    #[test]
    fn erase_edge_reports_removal() {
        let mut graph = abcd();
        assert!(graph.erase_edge(&"A", &"B", &3));
        assert!(!graph.erase_edge(&"A", &"B", &3));
        assert!(!graph.erase_edge(&"Z", &"B", &3));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn erase_edge_with_nan_weight_removes_nothing() {
        let mut graph = Graph::from_edges([("A", "B", 3.0)]).unwrap();
        assert!(!graph.erase_edge(&"A", &"B", &f64::NAN));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weights(&"A", &"B"), [3.0]);
        assert!(graph.erase_edge(&"A", &"B", &3.0));
    }

    #[test]
    fn replace_renames_in_place() {
        let mut graph = Graph::from_edges([("Hello", "how", 5.4), ("how", "are", 7.6)]).unwrap();
        assert_eq!(graph.replace(&"Hello", "how"), Ok(false));
        assert_eq!(graph.replace(&"Hello", "Hola"), Ok(true));
        assert_eq!(graph.nodes(), ["Hola", "are", "how"]);
        assert_eq!(graph.weights(&"Hola", &"how"), [5.4]);
        assert!(!graph.is_node(&"Hello"));

        assert_eq!(graph.replace(&"how", "how"), Ok(true));
        assert_eq!(
            graph.replace(&"Potehto", "Potahto"),
            Err(GraphError::MissingNode {
                op: "replace",
                node: "Potehto"
            })
        );
    }

    #[test]
    fn replace_resorts_incoming_edges() {
        let mut graph = Graph::from_edges([("x", "a", 1), ("x", "m", 1), ("x", "z", 1)]).unwrap();
        assert_eq!(graph.replace(&"a", "q"), Ok(true));
        assert_eq!(graph.connected(&"x").unwrap(), ["m", "q", "z"]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn merge_replace_turns_edges_into_self_loop() {
        let mut graph = Graph::from_edges([("A", "B", 3), ("B", "C", 2), ("B", "D", 4)]).unwrap();
        graph.merge_replace(&"B", &"A").unwrap();
        assert_eq!(graph.nodes(), ["A", "C", "D"]);
        assert!(graph.is_connected(&"A", &"A"));
        assert!(graph.is_connected(&"A", &"C"));
        assert!(graph.is_connected(&"A", &"D"));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn merge_replace_drops_duplicates() {
        let mut graph = Graph::from_edges([
            ("A", "B", 1),
            ("A", "C", 2),
            ("B", "B", 5),
            ("B", "C", 2),
            ("C", "A", 1),
            ("C", "B", 1),
        ])
        .unwrap();
        graph.merge_replace(&"B", &"A").unwrap();

        let triples: Vec<_> = graph.iter().map(|(s, d, w)| (*s, *d, *w)).collect();
        assert_eq!(
            triples,
            [("A", "A", 1), ("A", "A", 5), ("A", "C", 2), ("C", "A", 1)]
        );
    }

    #[test]
    fn merge_replace_requires_both_nodes() {
        let mut graph = abcd();
        let before = graph.clone();
        assert!(graph.merge_replace(&"A", &"Z").is_err());
        assert!(graph.merge_replace(&"Z", &"A").is_err());
        graph.merge_replace(&"A", &"A").unwrap();
        assert_eq!(graph, before);
    }
}
