//! Incremental graph builder.

use crate::error::GraphResult;
use crate::graph::Graph;

/// Builder for constructing a graph in bulk.
///
/// Use `add_node` and `add_edge` to collect nodes and `(source, destination,
/// weight)` triples in any order, then call `build()` to insert them and
/// validate the result. Edge endpoints become nodes automatically.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N, E> {
    nodes: Vec<N>,
    edges: Vec<(N, N, E)>,
}

impl<N, E> Default for GraphBuilder<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N, E> GraphBuilder<N, E> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a node (duplicates collapse at build time).
    pub fn add_node(&mut self, value: N) -> &mut Self {
        self.nodes.push(value);
        self
    }

    /// Queue an edge; both endpoints are created if missing.
    pub fn add_edge(&mut self, src: N, dst: N, weight: E) -> &mut Self {
        self.edges.push((src, dst, weight));
        self
    }

    /// Build and validate the graph.
    ///
    /// Fails if an edge weight is not comparable with itself.
    pub fn build(self) -> GraphResult<Graph<N, E>, N>
    where
        N: Ord,
        E: PartialOrd,
    {
        let mut graph = Graph::with_capacity(self.nodes.len());
        for value in self.nodes {
            graph.insert_node(value);
        }
        for (src, dst, weight) in self.edges {
            let src = graph.entry_slot(src);
            let dst = graph.entry_slot(dst);
            graph.link(src, dst, weight)?;
        }
        graph.validate()?;
        Ok(graph)
    }
}

impl<N, E> Extend<(N, N, E)> for GraphBuilder<N, E> {
    fn extend<I: IntoIterator<Item = (N, N, E)>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}
