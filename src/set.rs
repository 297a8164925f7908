use std::hash::Hash;

use crate::check::Violation;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::Interval;
use crate::iter::{IntoIter, Iter, Overlappers};
use crate::payload::Members;
use crate::rbtree::RbTree;

/// An ordered collection of intervals where several distinct values may share
/// one pair of bounds.
///
/// Values with equal bounds live together in a [`Members`] set, so `I` needs
/// `Eq` and `Hash` that tell them apart. Lengths and overlap counts are in
/// values, not in distinct bounds.
///
/// # Example
/// ```rust
/// use rb_interval_tree::{Interval, IntervalSetTree};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Booking {
///     from: i64,
///     to: i64,
///     room: &'static str,
/// }
///
/// impl Interval for Booking {
///     fn start(&self) -> i64 {
///         self.from
///     }
///     fn end(&self) -> i64 {
///         self.to
///     }
/// }
///
/// let mut tree = IntervalSetTree::new();
/// tree.insert(Booking { from: 9, to: 11, room: "red" });
/// tree.insert(Booking { from: 9, to: 11, room: "blue" });
/// tree.insert(Booking { from: 13, to: 14, room: "red" });
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.num_overlappers(&(10..12i64)), 2);
/// assert_eq!(tree.minimum().map(|m| m.len()), Some(2));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "I: serde::Serialize, Ix: serde::Serialize",
        deserialize = "I: serde::Deserialize<'de> + Eq + Hash, Ix: serde::Deserialize<'de>"
    ))
)]
pub struct IntervalSetTree<I, Ix = DefaultIx> {
    pub(crate) inner: RbTree<Members<I>, Ix>,
}

impl<I> IntervalSetTree<I>
where
    I: Interval + Eq + Hash,
{
    /// Create an empty `IntervalSetTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree holding just `interval`.
    #[inline]
    #[must_use]
    pub fn with_interval(interval: I) -> Self {
        let mut tree = Self::new();
        let _ignore = tree.insert(interval);
        tree
    }
}

impl<I> Default for IntervalSetTree<I>
where
    I: Interval + Eq + Hash,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<I, Ix> IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    /// Creates a new `IntervalSetTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RbTree::with_capacity(capacity),
        }
    }

    /// Insert a value. Returns `false` if an equal value is already present.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    #[inline]
    pub fn insert(&mut self, interval: I) -> bool {
        self.inner.insert(interval)
    }

    /// Remove the value equal to `interval`. Other values with the same bounds stay.
    #[inline]
    pub fn delete(&mut self, interval: &I) -> bool {
        self.inner.remove_member(interval).is_some()
    }

    /// Remove every value with the bounds of `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalSetTree, Span};
    ///
    /// let mut tree = IntervalSetTree::new();
    /// tree.insert(Span::new(0, 4));
    /// tree.insert(Span::new(2, 4));
    /// assert!(tree.delete_same_bounds(&(0..4i64)));
    /// assert!(!tree.delete_same_bounds(&(0..4i64)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn delete_same_bounds<J: Interval>(&mut self, key: &J) -> bool {
        self.remove(self.inner.search(key))
    }

    /// Remove every value of the smallest bounds.
    #[inline]
    pub fn delete_min(&mut self) -> bool {
        self.remove(self.inner.first())
    }

    /// Remove every value of the largest bounds.
    #[inline]
    pub fn delete_max(&mut self) -> bool {
        self.remove(self.inner.last())
    }

    /// Remove every value overlapping `query`. Returns whether anything was removed.
    #[inline]
    pub fn delete_overlappers<J: Interval>(&mut self, query: &J) -> bool {
        self.inner.remove_overlapping(query) > 0
    }

    /// Checks if a value equal to `interval` is present.
    #[inline]
    pub fn contains(&self, interval: &I) -> bool {
        self.search(interval).is_some_and(|m| m.contains(interval))
    }

    /// The values with the bounds of `key`.
    #[inline]
    pub fn search<J: Interval>(&self, key: &J) -> Option<&Members<I>> {
        self.inner.search(key).and_then(|x| self.inner.payload(x))
    }

    /// The values with the smallest bounds.
    #[inline]
    pub fn minimum(&self) -> Option<&Members<I>> {
        self.inner.first().and_then(|x| self.inner.payload(x))
    }

    /// The values with the largest bounds.
    #[inline]
    pub fn maximum(&self) -> Option<&Members<I>> {
        self.inner.last().and_then(|x| self.inner.payload(x))
    }

    /// The values with the next bounds after `key`. `None` if `key` is absent or the largest.
    #[inline]
    pub fn successor<J: Interval>(&self, key: &J) -> Option<&Members<I>> {
        let x = self.inner.search(key)?;
        self.inner.successor(x).and_then(|y| self.inner.payload(y))
    }

    /// The values with the bounds before `key`. `None` if `key` is absent or the smallest.
    #[inline]
    pub fn predecessor<J: Interval>(&self, key: &J) -> Option<&Members<I>> {
        let x = self.inner.search(key)?;
        self.inner.predecessor(x).and_then(|y| self.inner.payload(y))
    }

    /// Check if any value in the tree overlaps `query`.
    #[inline]
    pub fn overlaps<J: Interval>(&self, query: &J) -> bool {
        self.inner.any_overlapping_node(query).is_some()
    }

    /// Number of values overlapping `query`.
    #[inline]
    pub fn num_overlappers<J: Interval>(&self, query: &J) -> usize {
        self.inner.count_overlapping(query)
    }

    /// The values with the smallest bounds overlapping `query`.
    #[inline]
    pub fn minimum_overlapper<J: Interval>(&self, query: &J) -> Option<&Members<I>> {
        self.inner
            .first_overlapping_node(query)
            .and_then(|x| self.inner.payload(x))
    }

    /// Get an iterator over the values overlapping `query`, ordered by bounds.
    #[inline]
    pub fn overlappers<J: Interval>(&self, query: &J) -> Overlappers<'_, Members<I>, Ix> {
        Overlappers::new(&self.inner, query)
    }

    /// Get an iterator over the values of the tree, ordered by bounds.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Members<I>, Ix> {
        Iter::new(&self.inner)
    }

    /// Remove all values from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Return the number of values in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Return `true` if the tree contains no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Run every structural self-check. Meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), Violation> {
        self.inner.check_invariants()
    }

    /// Whether the nodes are in search-tree order.
    pub fn is_bst(&self) -> bool {
        self.inner.check_order().is_ok()
    }

    /// Whether every root-to-leaf path crosses the same number of black nodes.
    pub fn is_balanced(&self) -> bool {
        self.inner.check_black_height().is_ok()
    }

    /// Whether no red node has a red child.
    pub fn has_valid_red_coloring(&self) -> bool {
        self.inner.check_red_coloring().is_ok()
    }

    /// Whether every node's cached max end matches its subtree.
    pub fn has_consistent_max_ends(&self) -> bool {
        self.inner.check_max_ends().is_ok()
    }

    fn remove(&mut self, x: Option<NodeIndex<Ix>>) -> bool {
        x.and_then(|x| self.inner.remove_node(x)).is_some()
    }
}

impl<I, Ix> Extend<I> for IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        for interval in iter {
            let _ignore = self.insert(interval);
        }
    }
}

impl<I, Ix> FromIterator<I> for IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut tree = Self::with_capacity(0);
        tree.extend(iter);
        tree
    }
}

impl<'a, I, Ix> IntoIterator for &'a IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    type Item = &'a I;
    type IntoIter = Iter<'a, Members<I>, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, Ix> IntoIterator for IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    type Item = I;
    type IntoIter = IntoIter<Members<I>, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.inner)
    }
}
