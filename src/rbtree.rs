use std::cmp::Ordering;

use log::{debug, trace};

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::{Interval, Span};
use crate::node::{Color, Node};
use crate::payload::Payload;

/// A red-black tree of payloads keyed by [start, end), where every node caches
/// the largest end found in its subtree.
///
/// Nodes live in a vector and refer to each other by index. Slot 0 is the
/// sentinel, which stands in for every missing child and for the root of an
/// empty tree.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct RbTree<P, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<P, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of intervals in the tree, counting every payload member
    pub(crate) len: usize,
}

impl<P, Ix> RbTree<P, Ix>
where
    P: Payload,
    Ix: IndexType,
{
    /// Creates an empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Node::sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
        }
    }

    /// Remove all elements from the tree
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.node_ref(self.root, Node::is_sentinel)
    }

    /// Insert an item. If a node with the same bounds exists, the item is
    /// offered to its payload instead. Returns whether the tree grew.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    pub(crate) fn insert(&mut self, item: P::Item) -> bool {
        let key = Span::of(&item);

        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            // Keep max_end valid on the way down, fixup rotations rely on it.
            self.node_mut(x, Node::raise_max_end(key.end));
            match self.node_ref(x, |xn| key.cmp_bounds(xn)) {
                Ordering::Equal => {
                    let added = self
                        .node_mut(x, Node::payload_mut)
                        .is_some_and(|p| p.add(item));
                    if added {
                        self.len += 1;
                    }
                    return added;
                }
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }

        let z = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != z,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node::new(key.start, key.end, P::new(item)));
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else if self.node_ref(y, |yn| key.cmp_bounds(yn)).is_lt() {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        trace!("new node {:?} for {}", z, key);

        self.insert_fixup(z);

        self.len += 1;
        true
    }

    /// Remove a node from the tree, returning its payload.
    ///
    /// A node with two children takes over its successor's payload, and the
    /// successor is unlinked instead.
    pub(crate) fn remove_node(&mut self, z: NodeIndex<Ix>) -> Option<P> {
        if self.node_ref(z, Node::is_sentinel) {
            return None;
        }
        let mut y = z;
        if !self.left_ref(z, Node::is_sentinel) && !self.right_ref(z, Node::is_sentinel) {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            self.swap_payload(y, z);
        }

        let x = if self.left_ref(y, Node::is_sentinel) {
            self.node_ref(y, Node::right)
        } else {
            self.node_ref(y, Node::left)
        };
        self.transplant(y, x);
        self.update_max_bottom_up(self.node_ref(y, Node::parent));

        if self.node_ref(y, Node::is_black) {
            self.remove_fixup(x);
        }
        // The fixup may have borrowed the sentinel's parent link.
        self.node_mut(NodeIndex::sentinel(), Node::set_parent(NodeIndex::sentinel()));

        let payload = self.release(y);
        self.len -= payload.as_ref().map_or(0, |p| p.len());
        trace!("released node {:?}, {} intervals left", y, self.len);
        payload
    }

    /// Remove one member from the node with the member's bounds. The node goes
    /// once its payload is empty.
    pub(crate) fn remove_member(&mut self, item: &P::Item) -> Option<P::Item> {
        let x = self.search(item)?;
        let removed = self.node_mut(x, Node::payload_mut)?.remove(item)?;
        self.len -= 1;
        if self
            .node_ref(x, Node::payload)
            .is_some_and(|p| p.is_empty())
        {
            let _emptied = self.remove_node(x);
        }
        Some(removed)
    }

    /// Remove every node that overlaps `query`, returning the number of
    /// intervals removed.
    ///
    /// Removal reshapes the tree under a running overlap walk, so the bounds of
    /// all targets are collected before the first node goes.
    pub(crate) fn remove_overlapping<J: Interval>(&mut self, query: &J) -> usize {
        let targets: Vec<Span> = self
            .overlapping_nodes(query)
            .map(|x| self.node_ref(x, Span::of))
            .collect();
        let mut removed = 0;
        for span in &targets {
            if let Some(x) = self.search(span) {
                removed += self.remove_node(x).map_or(0, |p| p.len());
            }
        }
        debug!(
            "removed {} intervals in {} nodes overlapping [{}, {})",
            removed,
            targets.len(),
            query.start(),
            query.end()
        );
        removed
    }

    /// Search for the node with exactly the bounds of `key`.
    pub(crate) fn search<J: Interval>(&self, key: &J) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            if self.node_ref(x, Node::max_end) < key.end() {
                return None;
            }
            match self.node_ref(x, |xn| key.cmp_bounds(xn)) {
                Ordering::Equal => return Some(x),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }
        None
    }

    /// The payload stored at `x`, `None` for the sentinel.
    pub(crate) fn payload(&self, x: NodeIndex<Ix>) -> Option<&P> {
        self.node_ref(x, Node::payload)
    }

    /// The smallest node.
    pub(crate) fn first(&self) -> Option<NodeIndex<Ix>> {
        self.present(self.tree_minimum(self.root))
    }

    /// The largest node.
    pub(crate) fn last(&self) -> Option<NodeIndex<Ix>> {
        self.present(self.tree_maximum(self.root))
    }

    /// The node following `x` in ascending order.
    pub(crate) fn successor(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.right_ref(x, Node::is_sentinel) {
            return self.present(self.tree_minimum(self.node_ref(x, Node::right)));
        }
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && x == self.node_ref(y, Node::right) {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        self.present(y)
    }

    /// The node preceding `x` in ascending order.
    pub(crate) fn predecessor(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.left_ref(x, Node::is_sentinel) {
            return self.present(self.tree_maximum(self.node_ref(x, Node::left)));
        }
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && x == self.node_ref(y, Node::left) {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        self.present(y)
    }

    /// Search for any node that overlaps `query`.
    pub(crate) fn any_overlapping_node<J: Interval>(&self, query: &J) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) && !self.node_ref(x, |xn| xn.overlaps(query)) {
            if self.left_ref(x, Node::max_end) > query.start() {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.present(x)
    }

    /// The smallest node overlapping `query` in the whole tree.
    pub(crate) fn first_overlapping_node<J: Interval>(&self, query: &J) -> Option<NodeIndex<Ix>> {
        self.present(self.minimum_overlapping_node(self.root, query))
    }

    /// All nodes overlapping `query`, in ascending order.
    pub(crate) fn overlapping_nodes<'a, J: Interval>(
        &'a self,
        query: &'a J,
    ) -> impl Iterator<Item = NodeIndex<Ix>> + 'a {
        std::iter::successors(self.first_overlapping_node(query), move |&x| {
            self.present(self.next_overlapping_node(x, query))
        })
    }

    /// Number of intervals overlapping `query`, counting every payload member.
    pub(crate) fn count_overlapping<J: Interval>(&self, query: &J) -> usize {
        self.overlapping_nodes(query)
            .filter_map(|x| self.payload(x))
            .map(|p| p.len())
            .sum()
    }

    /// The smallest node overlapping `query` in the subtree rooted at `n`, or
    /// the sentinel.
    ///
    /// A subtree can only hold an overlapper if its `max_end` is past
    /// `query.start()`. The sentinel's `max_end` never is.
    pub(crate) fn minimum_overlapping_node<J: Interval>(
        &self,
        mut n: NodeIndex<Ix>,
        query: &J,
    ) -> NodeIndex<Ix> {
        let mut result = NodeIndex::sentinel();
        if self.node_ref(n, Node::max_end) <= query.start() {
            return result;
        }
        loop {
            if self.node_ref(n, |nn| nn.overlaps(query)) {
                // Anything smaller is on the left.
                result = n;
                n = self.node_ref(n, Node::left);
                if self.node_ref(n, Node::max_end) <= query.start() {
                    break;
                }
            } else if self.left_ref(n, Node::max_end) > query.start() {
                n = self.node_ref(n, Node::left);
            } else {
                // Nodes on the right start no earlier than this one.
                if self.node_ref(n, |nn| nn.start >= query.end()) {
                    break;
                }
                n = self.node_ref(n, Node::right);
                if self.node_ref(n, Node::max_end) <= query.start() {
                    break;
                }
            }
        }
        result
    }

    /// The node overlapping `query` that follows the overlapper `x`, or the
    /// sentinel.
    pub(crate) fn next_overlapping_node<J: Interval>(
        &self,
        mut x: NodeIndex<Ix>,
        query: &J,
    ) -> NodeIndex<Ix> {
        let mut next = self.minimum_overlapping_node(self.node_ref(x, Node::right), query);
        while self.node_ref(next, Node::is_sentinel) && !self.parent_ref(x, Node::is_sentinel) {
            if self.is_left_child(x) {
                let p = self.node_ref(x, Node::parent);
                if self.node_ref(p, |pn| pn.start >= query.end()) {
                    break;
                }
                next = if self.node_ref(p, |pn| pn.overlaps(query)) {
                    p
                } else {
                    self.minimum_overlapping_node(self.node_ref(p, Node::right), query)
                };
            }
            x = self.node_ref(x, Node::parent);
        }
        next
    }

    /// Restore red-black tree properties after an insert.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        trace!("remove fixup from {:?}", x);
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));

        self.rotate_update_max(x, y);
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));

        self.rotate_update_max(x, y);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Update the max value after a rotation. `x` now hangs below `y`.
    fn rotate_update_max(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.recalculate_max(x);
        self.recalculate_max(y);
    }

    /// Update the max value towards the root
    fn update_max_bottom_up(&mut self, x: NodeIndex<Ix>) {
        let mut p = x;
        while !self.node_ref(p, Node::is_sentinel) {
            self.recalculate_max(p);
            p = self.node_ref(p, Node::parent);
        }
    }

    /// Recalculate max value from left and right childrens
    fn recalculate_max(&mut self, x: NodeIndex<Ix>) {
        let max_end = self
            .node_ref(x, |xn| xn.end)
            .max(self.left_ref(x, Node::max_end))
            .max(self.right_ref(x, Node::max_end));
        self.node_mut(x, Node::set_max_end(max_end));
    }

    /// Find the node with the minimum interval.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum interval.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Exchange contents and bounds of two nodes, leaving links and colors.
    fn swap_payload(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) {
        let (a, b) = (a.index(), b.index());
        let moved = self.nodes[a].payload.take();
        self.nodes[a].payload = std::mem::replace(&mut self.nodes[b].payload, moved);
        let (start, end) = (self.nodes[a].start, self.nodes[a].end);
        self.nodes[a].start = self.nodes[b].start;
        self.nodes[a].end = self.nodes[b].end;
        self.nodes[b].start = start;
        self.nodes[b].end = end;
    }

    /// Drop an unlinked node from the arena, returning its payload.
    fn release(&mut self, y: NodeIndex<Ix>) -> Option<P> {
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(y.index());
        let old = NodeIndex::new(self.nodes.len());
        self.update_idx(old, y);
        node.payload.take()
    }

    /// Point every link that referred to `old` at `new` after `old` moved.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.nodes.get(new.index()).is_none() {
            return;
        }
        if self.root == old {
            self.root = new;
        }
        if !self.parent_ref(new, Node::is_sentinel) {
            if self.parent_ref(new, Node::left) == old {
                self.parent_mut(new, Node::set_left(new));
            } else {
                self.parent_mut(new, Node::set_right(new));
            }
        }
        if !self.left_ref(new, Node::is_sentinel) {
            self.left_mut(new, Node::set_parent(new));
        }
        if !self.right_ref(new, Node::is_sentinel) {
            self.right_mut(new, Node::set_parent(new));
        }
    }

    /// `Some(x)` unless `x` is the sentinel.
    fn present(&self, x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        (!self.node_ref(x, Node::is_sentinel)).then_some(x)
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, P, Ix> RbTree<P, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<P, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<P, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<P, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<P, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<P, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}
