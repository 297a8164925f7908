//! `rb_interval_tree` is an ordered collection of half-open integer intervals
//! based on an augmented red-black tree.
//!
//! Every node caches the largest end found in its subtree, so besides exact
//! lookup and ordered traversal the tree answers overlap queries (any, count,
//! enumerate, delete) in `O(log n + k)` time. Each modification runs in
//! `O(log n)`.
//!
//! Nodes are stored in a vector and refer to their parent and children by
//! index, with slot 0 reserved for a shared black sentinel. Rotations and
//! splices only reassign indices, and the trees stay `Send` and `Unpin`.
//!
//! Two flavors share one engine:
//! - [`IntervalTree`] keeps at most one interval per pair of bounds.
//! - [`IntervalSetTree`] keeps every distinct value, grouping values with equal
//!   bounds into a [`Members`] set.
//!
//! Any type implementing [`Interval`] can be stored. [`Span`] is a plain
//! [start, end) pair and `Range<i64>` works as a query.
//!
//! # Example
//!
//! ```rust
//! use rb_interval_tree::{IntervalTree, Span};
//!
//! let mut tree = IntervalTree::new();
//! tree.insert(Span::new(0, 10));
//! tree.insert(Span::new(20, 30));
//! assert!(tree.contains(&(0..10i64)));
//! assert!(tree.overlaps(&(5..15i64)));
//! assert!(!tree.overlaps(&(10..20i64)));
//! assert_eq!(tree.successor(&(0..10i64)), Some(&Span::new(20, 30)));
//! ```
//!

mod check;
#[cfg(feature = "graphviz")]
mod draw;
mod index;
mod interval;
mod iter;
mod node;
mod payload;
mod rbtree;
mod set;
mod tree;

#[cfg(test)]
mod tests;

pub use check::Violation;
pub use index::{DefaultIx, IndexType};
pub use interval::{Interval, Span};
pub use iter::{IntoIter, Iter, Overlappers};
pub use payload::{Members, Payload, Single};
pub use set::IntervalSetTree;
pub use tree::IntervalTree;
