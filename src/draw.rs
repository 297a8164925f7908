//! Graphviz export of the tree shape, colors and cached max ends.

use std::fmt::Debug;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::index::IndexType;
use crate::interval::{Interval, Span};
use crate::node::{Color, Node};
use crate::payload::Payload;
use crate::rbtree::RbTree;
use crate::set::IntervalSetTree;
use crate::tree::IntervalTree;

impl<P, Ix> RbTree<P, Ix>
where
    P: Payload,
    Ix: IndexType,
{
    /// Writes the tree in DOT format. `describe` renders the extra label
    /// line of a node, if any.
    fn write_dot<W, F>(&self, out: &mut W, describe: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&P) -> Option<String>,
    {
        writeln!(out, "digraph {{")?;
        writeln!(out, "    node [style=filled, fontcolor=white];")?;
        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            if self.node_ref(x, Node::is_sentinel) {
                continue;
            }
            let fill = match self.node_ref(x, Node::color) {
                Color::Red => "red",
                Color::Black => "black",
            };
            let mut label = format!(
                "{}\\nmax {}",
                self.node_ref(x, Span::of),
                self.node_ref(x, Node::max_end)
            );
            if let Some(extra) = self.payload(x).and_then(&describe) {
                label.push_str("\\n");
                label.push_str(&extra.replace('"', "\\\""));
            }
            writeln!(
                out,
                "    n{} [label=\"{}\", fillcolor={}];",
                x.index(),
                label,
                fill
            )?;
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if !self.node_ref(child, Node::is_sentinel) {
                    writeln!(out, "    n{} -> n{};", x.index(), child.index())?;
                    stack.push(child);
                }
            }
        }
        writeln!(out, "}}")?;
        out.flush()
    }

    fn draw_to<F>(&self, path: &Path, describe: F) -> io::Result<()>
    where
        F: Fn(&P) -> Option<String>,
    {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_dot(&mut out, describe)?;
        debug!("wrote {} nodes to {}", self.nodes.len() - 1, path.display());
        Ok(())
    }
}

fn list_members<P>(payload: &P) -> Option<String>
where
    P: Payload,
    P::Item: Debug,
{
    let members: Vec<String> = payload.members().map(|m| format!("{m:?}")).collect();
    Some(members.join(", "))
}

impl<I, Ix> IntervalTree<I, Ix>
where
    I: Interval,
    Ix: IndexType,
{
    /// Write the tree as a Graphviz DOT file, labelling each node with its
    /// bounds, cached max end and stored interval.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()>
    where
        I: Debug,
    {
        self.inner.draw_to(path.as_ref(), list_members)
    }

    /// Like [`IntervalTree::draw`], without the stored interval.
    pub fn draw_without_payload(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.inner.draw_to(path.as_ref(), |_| None)
    }
}

impl<I, Ix> IntervalSetTree<I, Ix>
where
    I: Interval + Eq + Hash,
    Ix: IndexType,
{
    /// Write the tree as a Graphviz DOT file, labelling each node with its
    /// bounds, cached max end and members.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()>
    where
        I: Debug,
    {
        self.inner.draw_to(path.as_ref(), list_members)
    }

    /// Like [`IntervalSetTree::draw`], without the members.
    pub fn draw_without_payload(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.inner.draw_to(path.as_ref(), |_| None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::payload::Single;

    #[test]
    fn dot_output_lists_every_node_and_edge() {
        let mut tree: RbTree<Single<Span>> = RbTree::with_capacity(3);
        tree.insert(Span::new(2, 4));
        tree.insert(Span::new(1, 9));
        tree.insert(Span::new(3, 5));

        let mut out = Vec::new();
        tree.write_dot(&mut out, list_members).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("[2, 4)\\nmax 9"));
        assert!(dot.contains("fillcolor=black"));
        assert_eq!(dot.matches("fillcolor=red").count(), 2);
        assert_eq!(dot.matches(" -> ").count(), 2);
    }
}
