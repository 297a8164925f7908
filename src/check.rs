//! Structural self-checks for tests and debugging.
//!
//! None of this runs during normal operation. Every walk uses an explicit
//! stack so that large trees cannot overflow the call stack.

use std::error::Error;
use std::fmt;

use crate::index::{IndexType, NodeIndex};
use crate::interval::{Interval, Span};
use crate::node::Node;
use crate::payload::Payload;
use crate::rbtree::RbTree;

/// The first broken invariant found by a tree self-check.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation {
    /// Two nodes are out of order.
    Order {
        /// The node that should be smaller
        lower: Span,
        /// The node that should be larger
        upper: Span,
    },
    /// A child does not name its parent as parent.
    Link {
        /// The parent
        parent: Span,
    },
    /// The root or the sentinel is red.
    RedRoot,
    /// Two paths below a node cross different numbers of black nodes.
    BlackHeight {
        /// The node where the paths split
        at: Span,
        /// Black nodes on the leftmost path
        expected: usize,
        /// Black nodes on the offending path
        found: usize,
    },
    /// A red node has a red child.
    RedRed {
        /// The red parent
        parent: Span,
        /// The red child
        child: Span,
    },
    /// A cached maximum end disagrees with the node and its children.
    MaxEnd {
        /// The node
        at: Span,
        /// Value stored in the node
        cached: i64,
        /// Value derived from the node and its children
        actual: i64,
    },
    /// The recorded length disagrees with the intervals reachable from the root.
    Count {
        /// Length stored in the tree
        recorded: usize,
        /// Intervals reachable from the root
        reachable: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Order { lower, upper } => {
                write!(f, "node {lower} is not ordered before {upper}")
            }
            Violation::Link { parent } => {
                write!(f, "a child of {parent} does not link back to it")
            }
            Violation::RedRoot => write!(f, "root or sentinel is red"),
            Violation::BlackHeight {
                at,
                expected,
                found,
            } => write!(
                f,
                "path below {at} has black height {found}, expected {expected}"
            ),
            Violation::RedRed { parent, child } => {
                write!(f, "red node {parent} has red child {child}")
            }
            Violation::MaxEnd { at, cached, actual } => {
                write!(f, "node {at} caches max end {cached}, actual {actual}")
            }
            Violation::Count {
                recorded,
                reachable,
            } => write!(
                f,
                "tree records {recorded} intervals but {reachable} are reachable"
            ),
        }
    }
}

impl Error for Violation {}

impl<P, Ix> RbTree<P, Ix>
where
    P: Payload,
    Ix: IndexType,
{
    /// Run every check, returning the first violation.
    pub(crate) fn check_invariants(&self) -> Result<(), Violation> {
        self.check_order()?;
        self.check_black_height()?;
        self.check_red_coloring()?;
        self.check_max_ends()?;
        self.check_count()
    }

    fn span(&self, x: NodeIndex<Ix>) -> Span {
        self.node_ref(x, Span::of)
    }

    /// Every node reachable from the root, parents before children.
    fn reachable(&self) -> Vec<NodeIndex<Ix>> {
        let mut nodes = Vec::new();
        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            if self.node_ref(x, Node::is_sentinel) {
                continue;
            }
            nodes.push(x);
            stack.push(self.node_ref(x, Node::right));
            stack.push(self.node_ref(x, Node::left));
        }
        nodes
    }

    /// Search-tree order, with parent links matching child links.
    pub(crate) fn check_order(&self) -> Result<(), Violation> {
        let mut stack: Vec<(NodeIndex<Ix>, Option<NodeIndex<Ix>>, Option<NodeIndex<Ix>>)> =
            vec![(self.root, None, None)];
        while let Some((x, lower, upper)) = stack.pop() {
            if self.node_ref(x, Node::is_sentinel) {
                continue;
            }
            let span = self.span(x);
            if let Some(l) = lower {
                if !self.span(l).cmp_bounds(&span).is_lt() {
                    return Err(Violation::Order {
                        lower: self.span(l),
                        upper: span,
                    });
                }
            }
            if let Some(u) = upper {
                if !span.cmp_bounds(&self.span(u)).is_lt() {
                    return Err(Violation::Order {
                        lower: span,
                        upper: self.span(u),
                    });
                }
            }
            let (left, right) = self.node_ref(x, |xn| (xn.left, xn.right));
            for child in [left, right] {
                if !self.node_ref(child, Node::is_sentinel) && self.node_ref(child, Node::parent) != x
                {
                    return Err(Violation::Link { parent: span });
                }
            }
            stack.push((left, lower, Some(x)));
            stack.push((right, Some(x), upper));
        }
        Ok(())
    }

    /// Equal black height on every root-to-sentinel path, black root and sentinel.
    pub(crate) fn check_black_height(&self) -> Result<(), Violation> {
        if self.node_ref(NodeIndex::sentinel(), Node::is_red)
            || self.node_ref(self.root, Node::is_red)
        {
            return Err(Violation::RedRoot);
        }
        if self.is_empty() {
            return Ok(());
        }
        let mut expected = 0;
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            if self.node_ref(x, Node::is_black) {
                expected += 1;
            }
            x = self.node_ref(x, Node::left);
        }

        let mut stack = vec![(self.root, 0)];
        while let Some((x, above)) = stack.pop() {
            let found = above + usize::from(self.node_ref(x, Node::is_black));
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if self.node_ref(child, Node::is_sentinel) {
                    if found != expected {
                        return Err(Violation::BlackHeight {
                            at: self.span(x),
                            expected,
                            found,
                        });
                    }
                } else {
                    stack.push((child, found));
                }
            }
        }
        Ok(())
    }

    /// No red node has a red child.
    pub(crate) fn check_red_coloring(&self) -> Result<(), Violation> {
        for x in self.reachable() {
            if self.node_ref(x, Node::is_black) {
                continue;
            }
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if self.node_ref(child, Node::is_red) {
                    return Err(Violation::RedRed {
                        parent: self.span(x),
                        child: self.span(child),
                    });
                }
            }
        }
        Ok(())
    }

    /// Every cached max end equals the largest of the node's end and its
    /// children's cached values.
    pub(crate) fn check_max_ends(&self) -> Result<(), Violation> {
        for x in self.reachable() {
            let actual = self
                .node_ref(x, |xn| xn.end)
                .max(self.left_ref(x, Node::max_end))
                .max(self.right_ref(x, Node::max_end));
            let cached = self.node_ref(x, Node::max_end);
            if cached != actual {
                return Err(Violation::MaxEnd {
                    at: self.span(x),
                    cached,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// The recorded length matches the payloads reachable from the root.
    pub(crate) fn check_count(&self) -> Result<(), Violation> {
        let reachable: usize = self
            .reachable()
            .into_iter()
            .filter_map(|x| self.payload(x))
            .map(|p| p.len())
            .sum();
        if reachable != self.len {
            return Err(Violation::Count {
                recorded: self.len,
                reachable,
            });
        }
        Ok(())
    }
}
