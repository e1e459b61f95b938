#![forbid(unsafe_code)]

//! List reorder transform.
//!
//! [`reorder`] moves one element to a new position and returns a fresh
//! sequence. The destination index is read in the post-removal frame, so
//! `reorder(["A", "B", "C"], 0, 2)` yields `["B", "C", "A"]` ("move to
//! position 2"), not "insert before the original position 2".
//!
//! # Invariants
//!
//! 1. The output has the same length and the same multiset of elements.
//! 2. Only the element at `source` changes position relative to the others.
//! 3. The input slice is never mutated.
//! 4. Out-of-range indices are rejected with `None`, never a panic.

use crate::context::DropResult;
use crate::item::Draggable;

/// Move the element at `source` to `destination`.
///
/// Returns `None` when either index is out of range.
///
/// ```
/// use fdnd_core::reorder::reorder;
///
/// let list = ["A", "B", "C"];
/// assert_eq!(reorder(&list, 1, 0), Some(vec!["B", "A", "C"]));
/// assert_eq!(reorder(&list, 0, 3), None);
/// ```
#[must_use]
pub fn reorder<T: Clone>(list: &[T], source: usize, destination: usize) -> Option<Vec<T>> {
    if source >= list.len() || destination >= list.len() {
        return None;
    }
    let mut result = list.to_vec();
    let moved = result.remove(source);
    result.insert(destination, moved);
    Some(result)
}

/// Apply a finished gesture to a host list.
///
/// Returns `None` when the list should stay as it is: the gesture ended
/// without a placement, the item was dropped where it started, or the
/// indices no longer fit the list. Also `None` when the item at
/// `source_index` is not the dragged one, which means the list changed
/// under the gesture.
#[must_use]
pub fn apply_drop<T: Draggable + Clone>(list: &[T], result: &DropResult) -> Option<Vec<T>> {
    let destination = result.destination_index?;
    if destination == result.source_index {
        return None;
    }
    let source = list.get(result.source_index)?;
    if source.draggable_id() != result.draggable_id {
        tracing::debug!(
            draggable_id = %result.draggable_id,
            found = source.draggable_id(),
            source = result.source_index,
            "drop result does not match list, ignored"
        );
        return None;
    }
    reorder(list, result.source_index, destination)
}
