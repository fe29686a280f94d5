//! An augmented interval tree ([`interval_tree::IntervalTree`]) over closed intervals,
//! and a handful of sweep-line algorithms ([`sweep_line`]) over half-open ones.
//!
//! The tree is a plain (unbalanced) binary search tree keyed on interval start,
//! where every node caches the maximum end-point of its subtree, as in Cormen et al.
//! (2009, Section 14.3: Interval trees). That cache lets it answer overlap
//! queries ("which intervals intersect `[a, b]`?") and stabbing queries ("which
//! intervals contain `p`?") without visiting subtrees that cannot match.
//!
//! The sweep-line functions turn a batch of intervals into sorted start/end
//! events and compute, in one pass, the minimum number of meeting rooms, the
//! length of the union, or the length covered by at least `k` intervals.
//!
//! Note that any type satisfying the [`Ord`] trait can be stored in the tree.

mod error;
/// The closed interval type shared by the tree.
pub mod interval;
/// An interval tree implemented with a binary search tree.
pub mod interval_tree;
mod node;
pub mod sweep_line;

pub use error::{Error, Result};
pub use interval::{overlaps, Interval};
pub use interval_tree::IntervalTree;
pub use sweep_line::{k_overlap_length, min_meeting_rooms, total_coverage};
