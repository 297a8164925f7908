use crate::check::Violation;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::Interval;
use crate::iter::{IntoIter, Iter, Overlappers};
use crate::payload::{Payload, Single};
use crate::rbtree::RbTree;

/// An ordered set of intervals with at most one interval per [start, end).
///
/// Besides exact lookup and ordered traversal, the tree answers "which
/// intervals overlap this one" in `O(log n + k)`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalTree<I, Ix = DefaultIx> {
    pub(crate) inner: RbTree<Single<I>, Ix>,
}

impl<I> IntervalTree<I>
where
    I: Interval,
{
    /// Create an empty `IntervalTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree holding just `interval`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let tree = IntervalTree::with_interval(Span::new(0, 10));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.minimum(), Some(&Span::new(0, 10)));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_interval(interval: I) -> Self {
        let mut tree = Self::new();
        let _ignore = tree.insert(interval);
        tree
    }
}

impl<I> Default for IntervalTree<I>
where
    I: Interval,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<I, Ix> IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    /// Creates a new `IntervalTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RbTree::with_capacity(capacity),
        }
    }

    /// Insert an interval into the tree. Returns `false`, leaving the tree
    /// untouched, if an interval with the same bounds is already present.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let mut tree = IntervalTree::new();
    /// assert!(tree.insert(Span::new(1, 3)));
    /// assert!(!tree.insert(Span::new(1, 3)));
    /// assert!(tree.insert(Span::new(1, 4)));
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, interval: I) -> bool {
        self.inner.insert(interval)
    }

    /// Remove the interval with the bounds of `key`, returning it if it exists.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(Span::new(1, 3));
    /// tree.insert(Span::new(2, 4));
    /// assert_eq!(tree.delete(&(3..6i64)), None);
    /// assert_eq!(tree.delete(&(2..4i64)), Some(Span::new(2, 4)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn delete<J: Interval>(&mut self, key: &J) -> Option<I> {
        let x = self.inner.search(key)?;
        self.inner.remove_node(x)?.into_members().next()
    }

    /// Remove the smallest interval, if any.
    #[inline]
    pub fn delete_min(&mut self) -> Option<I> {
        let x = self.inner.first()?;
        self.inner.remove_node(x)?.into_members().next()
    }

    /// Remove the largest interval, if any.
    #[inline]
    pub fn delete_max(&mut self) -> Option<I> {
        let x = self.inner.last()?;
        self.inner.remove_node(x)?.into_members().next()
    }

    /// Remove every interval overlapping `query`. Returns whether anything was removed.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let mut tree: IntervalTree<Span> = [(0, 3), (2, 5), (5, 8), (9, 12)]
    ///     .into_iter()
    ///     .map(|(s, e)| Span::new(s, e))
    ///     .collect();
    /// assert!(tree.delete_overlappers(&(2..6i64)));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&Span::new(9, 12)]);
    /// assert!(!tree.delete_overlappers(&(2..6i64)));
    /// ```
    #[inline]
    pub fn delete_overlappers<J: Interval>(&mut self, query: &J) -> bool {
        self.inner.remove_overlapping(query) > 0
    }

    /// Checks if an interval with the bounds of `key` is present.
    #[inline]
    pub fn contains<J: Interval>(&self, key: &J) -> bool {
        self.inner.search(key).is_some()
    }

    /// Return the stored interval with the bounds of `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let tree = IntervalTree::with_interval(Span::new(0, 10));
    /// assert_eq!(tree.search(&(0..10i64)), Some(&Span::new(0, 10)));
    /// assert_eq!(tree.search(&(1..9i64)), None);
    /// ```
    #[inline]
    pub fn search<J: Interval>(&self, key: &J) -> Option<&I> {
        self.inner.search(key).and_then(|x| self.get(x))
    }

    /// The smallest interval.
    #[inline]
    pub fn minimum(&self) -> Option<&I> {
        self.inner.first().and_then(|x| self.get(x))
    }

    /// The largest interval.
    #[inline]
    pub fn maximum(&self) -> Option<&I> {
        self.inner.last().and_then(|x| self.get(x))
    }

    /// The interval following `key`. `None` if `key` is absent or the largest.
    #[inline]
    pub fn successor<J: Interval>(&self, key: &J) -> Option<&I> {
        let x = self.inner.search(key)?;
        self.inner.successor(x).and_then(|y| self.get(y))
    }

    /// The interval preceding `key`. `None` if `key` is absent or the smallest.
    #[inline]
    pub fn predecessor<J: Interval>(&self, key: &J) -> Option<&I> {
        let x = self.inner.search(key)?;
        self.inner.predecessor(x).and_then(|y| self.get(y))
    }

    /// Check if any interval in the tree overlaps `query`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(Span::new(1, 3));
    /// tree.insert(Span::new(6, 7));
    /// tree.insert(Span::new(9, 11));
    /// assert!(tree.overlaps(&(2..5i64)));
    /// assert!(tree.overlaps(&(1..17i64)));
    /// assert!(!tree.overlaps(&(3..6i64)));
    /// assert!(!tree.overlaps(&(11..23i64)));
    /// ```
    #[inline]
    pub fn overlaps<J: Interval>(&self, query: &J) -> bool {
        self.inner.any_overlapping_node(query).is_some()
    }

    /// Number of intervals overlapping `query`.
    #[inline]
    pub fn num_overlappers<J: Interval>(&self, query: &J) -> usize {
        self.inner.count_overlapping(query)
    }

    /// The smallest interval overlapping `query`.
    #[inline]
    pub fn minimum_overlapper<J: Interval>(&self, query: &J) -> Option<&I> {
        self.inner
            .first_overlapping_node(query)
            .and_then(|x| self.get(x))
    }

    /// Get an iterator over the intervals overlapping `query`, in ascending order.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{IntervalTree, Span};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(Span::new(1, 3));
    /// tree.insert(Span::new(2, 4));
    /// tree.insert(Span::new(6, 7));
    /// tree.insert(Span::new(7, 11));
    /// let found: Vec<_> = tree.overlappers(&(2..7i64)).collect();
    /// assert_eq!(found, [&Span::new(1, 3), &Span::new(2, 4), &Span::new(6, 7)]);
    /// ```
    #[inline]
    pub fn overlappers<J: Interval>(&self, query: &J) -> Overlappers<'_, Single<I>, Ix> {
        Overlappers::new(&self.inner, query)
    }

    /// Get an iterator over the intervals of the tree, sorted by bounds.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Single<I>, Ix> {
        Iter::new(&self.inner)
    }

    /// Remove all intervals from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Return the number of intervals in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Return `true` if the tree contains no intervals.
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

    fn get(&self, x: NodeIndex<Ix>) -> Option<&I> {
        self.inner.payload(x).and_then(Single::get)
    }
}

impl<I, Ix> Extend<I> for IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        for interval in iter {
            let _ignore = self.insert(interval);
        }
    }
}

impl<I, Ix> FromIterator<I> for IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut tree = Self::with_capacity(0);
        tree.extend(iter);
        tree
    }
}

impl<'a, I, Ix> IntoIterator for &'a IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    type Item = &'a I;
    type IntoIter = Iter<'a, Single<I>, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, Ix> IntoIterator for IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    type Item = I;
    type IntoIter = IntoIter<Single<I>, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.inner)
    }
}
