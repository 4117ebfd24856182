//! dg-core: stable foundation for the dg graph container.
//!
//! Contains:
//! - ids (stable compact slot handles for arena-stored nodes)
//! - weight (ordering helpers for partially ordered edge weights)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod weight;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::SlotId;
pub use weight::*;
