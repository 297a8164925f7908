use std::fmt;
use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::interval::{Interval, Span};
use crate::node::Node;
use crate::payload::Payload;
use crate::rbtree::RbTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<P, Ix>(tree: &RbTree<P, Ix>, mut x: NodeIndex<Ix>, stack: &mut Vec<NodeIndex<Ix>>)
where
    Ix: IndexType,
{
    while !tree.node_ref(x, Node::is_sentinel) {
        stack.push(x);
        x = tree.node_ref(x, Node::left);
    }
}

/// An iterator over the intervals of a tree, in ascending order.
///
/// Members sharing one pair of bounds come out together, in no particular order.
pub struct Iter<'a, P: Payload + 'a, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<P, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Members of the node being drained
    members: Option<P::Iter<'a>>,
    /// Intervals not yet yielded
    remaining: usize,
}

impl<'a, P, Ix> Iter<'a, P, Ix>
where
    P: Payload + 'a,
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<P, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(tree, tree.root, &mut stack);
        Iter {
            tree,
            stack,
            members: None,
            remaining: tree.len(),
        }
    }
}

impl<'a, P, Ix> Iterator for Iter<'a, P, Ix>
where
    P: Payload + 'a,
    Ix: IndexType,
{
    type Item = &'a P::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(members) = self.members.as_mut() {
                if let Some(item) = members.next() {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(item);
                }
                self.members = None;
            }
            let x = self.stack.pop()?;
            left_link(self.tree, self.tree.node_ref(x, Node::right), &mut self.stack);
            self.members = self.tree.payload(x).map(|p| p.members());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, P: Payload + 'a, Ix: IndexType> ExactSizeIterator for Iter<'a, P, Ix> {}

impl<'a, P: Payload + 'a, Ix: IndexType> FusedIterator for Iter<'a, P, Ix> {}

impl<'a, P: Payload + 'a, Ix: fmt::Debug> fmt::Debug for Iter<'a, P, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("stack", &self.stack)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// An iterator over the intervals of a tree that overlap a query, in
/// ascending order.
///
/// Each step starts from the previous overlapper and skips every subtree
/// whose largest end cannot reach the query.
pub struct Overlappers<'a, P: Payload + 'a, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<P, Ix>,
    /// Bounds of the query
    query: Span,
    /// Next overlapping node, or the sentinel
    next: NodeIndex<Ix>,
    /// Members of the node being drained
    members: Option<P::Iter<'a>>,
}

impl<'a, P, Ix> Overlappers<'a, P, Ix>
where
    P: Payload + 'a,
    Ix: IndexType,
{
    pub(crate) fn new<J: Interval>(tree: &'a RbTree<P, Ix>, query: &J) -> Self {
        let query = Span::of(query);
        Overlappers {
            tree,
            next: tree.minimum_overlapping_node(tree.root, &query),
            query,
            members: None,
        }
    }
}

impl<'a, P, Ix> Iterator for Overlappers<'a, P, Ix>
where
    P: Payload + 'a,
    Ix: IndexType,
{
    type Item = &'a P::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(members) = self.members.as_mut() {
                if let Some(item) = members.next() {
                    return Some(item);
                }
                self.members = None;
            }
            if self.tree.node_ref(self.next, Node::is_sentinel) {
                return None;
            }
            let x = self.next;
            self.next = self.tree.next_overlapping_node(x, &self.query);
            self.members = self.tree.payload(x).map(|p| p.members());
        }
    }
}

impl<'a, P: Payload + 'a, Ix: IndexType> FusedIterator for Overlappers<'a, P, Ix> {}

impl<'a, P: Payload + 'a, Ix: fmt::Debug> fmt::Debug for Overlappers<'a, P, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlappers")
            .field("query", &self.query)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

/// An owning iterator over the intervals of a tree, in ascending order.
pub struct IntoIter<P: Payload, Ix> {
    tree: RbTree<P, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Members of the node being drained
    members: Option<P::IntoIter>,
}

impl<P, Ix> IntoIter<P, Ix>
where
    P: Payload,
    Ix: IndexType,
{
    pub(crate) fn new(tree: RbTree<P, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(&tree, tree.root, &mut stack);
        IntoIter {
            tree,
            stack,
            members: None,
        }
    }
}

impl<P, Ix> Iterator for IntoIter<P, Ix>
where
    P: Payload,
    Ix: IndexType,
{
    type Item = P::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(members) = self.members.as_mut() {
                if let Some(item) = members.next() {
                    return Some(item);
                }
                self.members = None;
            }
            let x = self.stack.pop()?;
            left_link(&self.tree, self.tree.node_ref(x, Node::right), &mut self.stack);
            self.members = self.tree.nodes[x.index()]
                .payload
                .take()
                .map(Payload::into_members);
        }
    }
}

impl<P: Payload, Ix: IndexType> FusedIterator for IntoIter<P, Ix> {}

impl<P: Payload, Ix: fmt::Debug> fmt::Debug for IntoIter<P, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}
