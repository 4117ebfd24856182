use core::cmp::Ordering;

use crate::CoreError;

/// Total comparison for weights admitted into a graph.
///
/// Weights only need `PartialOrd`. Admission goes through
/// [`ensure_comparable`], so stored weights are self-comparable; a pair that
/// is still incomparable is treated as equal.
pub fn cmp_weight<E: PartialOrd>(a: &E, b: &E) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Reject weights that do not compare equal to themselves (e.g. NaN).
pub fn ensure_comparable<E: PartialOrd>(w: &E, what: &'static str) -> Result<(), CoreError> {
    match w.partial_cmp(w) {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(CoreError::IncomparableWeight { what }),
    }
}
