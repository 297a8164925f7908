use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;

/// Node of the interval tree
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<P, Ix> {
    /// Left children
    pub left: NodeIndex<Ix>,
    /// Right children
    pub right: NodeIndex<Ix>,
    /// Parent
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Start shared by every member of the payload
    pub start: i64,
    /// End shared by every member of the payload
    pub end: i64,
    /// Largest end in the subtree rooted here
    pub max_end: i64,
    /// Contents of the node, `None` only for the sentinel
    pub payload: Option<P>,
}

impl<P, Ix> Node<P, Ix>
where
    Ix: IndexType,
{
    /// The sentinel: black, linked to itself, and with a `max_end` no query can beat.
    pub fn sentinel() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            start: i64::MIN,
            end: i64::MIN,
            max_end: i64::MIN,
            payload: None,
        }
    }

    /// A detached red node.
    pub fn new(start: i64, end: i64, payload: P) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Red,
            start,
            end,
            max_end: end,
            payload: Some(payload),
        }
    }
}

// Convenient getter/setter methods
impl<P, Ix> Node<P, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn max_end(&self) -> i64 {
        self.max_end
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut P> {
        self.payload.as_mut()
    }

    pub fn is_sentinel(&self) -> bool {
        self.payload.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.color = color;
        }
    }

    pub fn set_max_end(max_end: i64) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.max_end = max_end;
        }
    }

    /// Raises the cached `max_end` to at least `end`.
    pub fn raise_max_end(end: i64) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.max_end = node.max_end.max(end);
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<P, Ix>) {
        move |node: &mut Node<P, Ix>| {
            node.parent = parent;
        }
    }
}

impl<P, Ix> Interval for Node<P, Ix> {
    #[inline]
    fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    fn end(&self) -> i64 {
        self.end
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
