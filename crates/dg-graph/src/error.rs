//! Graph-specific error types.

use dg_core::CoreError;
use thiserror::Error;

pub type GraphResult<T, N> = Result<T, GraphError<N>>;

/// Precondition violations reported by graph operations.
///
/// Generic over the node type so the offending value travels with the error.
/// A call that returns an error has left the graph unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<N> {
    /// The operation needs a node that is not in the graph.
    #[error("Cannot call Graph::{op} on a node that does not exist: {node:?}")]
    MissingNode { op: &'static str, node: N },

    /// A cursor position that does not address an edge of this graph.
    #[error("Cannot call Graph::{op} with a position that does not address an edge")]
    InvalidPosition { op: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl<N> GraphError<N> {
    pub(crate) fn missing(op: &'static str, node: &N) -> Self
    where
        N: Clone,
    {
        GraphError::MissingNode {
            op,
            node: node.clone(),
        }
    }
}
