//! dg-graph: ordered directed weighted graph container.
//!
//! Provides:
//! - `Graph<N, E>`: unique, ordered node values; parallel edges distinguished by weight
//! - Structural operations (insert/delete, rename, merge) that keep every invariant
//! - A bidirectional cursor and double-ended iterator over `(src, dst, weight)` triples
//! - Bulk construction through `GraphBuilder`
//!
//! # Example
//!
//! ```
//! use dg_graph::Graph;
//!
//! let mut graph = Graph::from_edges([("A", "B", 3), ("B", "C", 2), ("B", "D", 4)]).unwrap();
//! graph.merge_replace(&"B", &"A").unwrap();
//!
//! assert_eq!(graph.nodes(), ["A", "C", "D"]);
//! assert!(graph.is_connected(&"A", &"A"));
//!
//! let first = graph.begin().get();
//! assert_eq!(first, Some((&"A", &"A", &3)));
//! ```

mod arena;
pub mod builder;
pub mod cursor;
mod edges;
pub mod error;
pub mod graph;
mod mutate;
mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use cursor::{Cursor, EdgeRef, Edges, Position};
pub use dg_core::CoreError;
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
